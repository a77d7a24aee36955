// gjbench - EMatch vs GenericJoin benchmark analysis
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Number formatting for table output.

/// Fixed-precision ratio formatting with a scientific-notation cutoff.
///
/// Values strictly between 0 and 1 drop the leading zero and keep a space
/// in its place, so columns stay aligned.
///
/// # Examples
///
/// ```
/// use gjbench_cli::format::NumberFormat;
///
/// let fmt = NumberFormat::new(3, 1000.0);
/// assert_eq!(fmt.ratio(0.4717), " .472");
/// assert_eq!(fmt.ratio(1.6667), "1.667");
/// assert_eq!(fmt.ratio(25000.0), "2.500e4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberFormat {
    precision: usize,
    sci_threshold: f64,
}

impl NumberFormat {
    /// Creates a formatter.
    pub fn new(precision: usize, sci_threshold: f64) -> Self {
        Self {
            precision,
            sci_threshold,
        }
    }

    /// Column width that fits a fixed-notation ratio below 10.
    pub fn width(&self) -> usize {
        self.precision + 2
    }

    /// Formats one ratio.
    pub fn ratio(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        if value.abs() >= self.sci_threshold {
            return format!("{:.*e}", self.precision, value);
        }
        let text = format!("{:.*}", self.precision, value);
        match text.strip_prefix('0') {
            Some(rest) if value > 0.0 && value < 1.0 && rest.starts_with('.') => format!(" {}", rest),
            _ => text,
        }
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::new(3, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_zero_replaced() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.ratio(0.4), " .400");
        assert_eq!(fmt.ratio(0.0004), " .000");
        assert_eq!(fmt.ratio(0.99999), "1.000");
    }

    #[test]
    fn test_fixed_and_scientific() {
        let fmt = NumberFormat::new(2, 100.0);
        assert_eq!(fmt.ratio(1.0), "1.00");
        assert_eq!(fmt.ratio(99.994), "99.99");
        assert_eq!(fmt.ratio(100.0), "1.00e2");
        assert_eq!(fmt.ratio(123456.0), "1.23e5");
    }

    #[test]
    fn test_precision_zero() {
        let fmt = NumberFormat::new(0, 1000.0);
        assert_eq!(fmt.ratio(0.4), "0");
        assert_eq!(fmt.ratio(2.6), "3");
    }

    #[test]
    fn test_width() {
        assert_eq!(NumberFormat::new(3, 10.0).width(), 5);
    }
}
