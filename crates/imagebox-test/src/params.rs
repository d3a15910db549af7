//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use imagebox_core::Bitmap;
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, current index, mode and success status. Every
/// check increments the index so golden files are numbered in call order.
pub struct RegParams {
    /// Name of the test (e.g., "slice")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
    /// Golden files that were requested but absent
    skipped: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode comes from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two bitmaps for exact equality
    pub fn compare_bitmaps(&mut self, bmp1: &Bitmap, bmp2: &Bitmap) -> bool {
        self.index += 1;

        if bmp1.dimensions() != bmp2.dimensions() {
            self.fail(format!(
                "Failure in {}_reg: bitmap comparison for index {} - dimension mismatch {:?} vs {:?}",
                self.test_name,
                self.index,
                bmp1.dimensions(),
                bmp2.dimensions()
            ));
            return false;
        }

        let width = bmp1.width() as usize;
        if let Some(pos) = bmp1
            .data()
            .iter()
            .zip(bmp2.data())
            .position(|(a, b)| a != b)
        {
            self.fail(format!(
                "Failure in {}_reg: bitmap comparison for index {} - pixel mismatch at ({}, {})",
                self.test_name,
                self.index,
                pos % width,
                pos / width
            ));
            return false;
        }

        true
    }

    /// Compare two binary data arrays
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            self.fail(format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            ));
            false
        } else {
            true
        }
    }

    /// Write a bitmap as PNG and check it against its golden file
    pub fn write_bitmap_and_check(&mut self, bitmap: &Bitmap) -> TestResult<()> {
        self.index += 1;

        let local_path = format!("{}/{}.{:02}.png", regout_dir(), self.test_name, self.index);
        imagebox_io::write_image(bitmap, &local_path, imagebox_io::ImageFormat::Png).map_err(
            |e| TestError::ImageWrite {
                path: local_path.clone(),
                message: e.to_string(),
            },
        )?;

        self.check_file(&local_path)
    }

    /// Write data to file and check against golden file
    pub fn write_data_and_check(&mut self, data: &[u8], ext: &str) -> TestResult<()> {
        self.index += 1;

        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            ext
        );

        fs::write(&local_path, data)?;
        self.check_file(&local_path)
    }

    /// Check a file against its golden counterpart
    ///
    /// In generate mode, copies the file to golden.
    /// In compare mode, compares with the golden file if one exists.
    /// In display mode, does nothing.
    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let ext = Path::new(local_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    eprintln!(
                        "Skipped in {}_reg, index {}: no golden file {}",
                        self.test_name, self.index, golden_path
                    );
                    self.skipped.push(golden_path);
                    return Ok(());
                }

                let local_data = fs::read(local_path)?;
                let golden_data = fs::read(&golden_path)?;

                if local_data != golden_data && !same_pixels(local_path, &golden_path) {
                    self.fail(format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    ));
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        if !self.skipped.is_empty() {
            eprintln!("  ({} golden files missing)", self.skipped.len());
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Golden files that were missing in compare mode
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }
}

/// Compare two image files pixel-by-pixel
fn same_pixels(path1: &str, path2: &str) -> bool {
    match (
        imagebox_io::read_image(path1),
        imagebox_io::read_image(path2),
    ) {
        (Ok(a), Ok(b)) => a.equals(&b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagebox_core::Color;

    #[test]
    fn test_mode_from_env() {
        let mode = RegTestMode::from_env();
        assert!(matches!(
            mode,
            RegTestMode::Compare | RegTestMode::Generate | RegTestMode::Display
        ));
    }

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.index(), 3);
    }

    #[test]
    fn test_compare_bitmaps() {
        let mut rp = RegParams::new("test");
        let a = Bitmap::new_filled(3, 3, Color::WHITE).unwrap();
        let mut m = a.to_mut();
        m.set_rgb(2, 1, 0, 0, 0).unwrap();
        let b: Bitmap = m.into();

        assert!(rp.compare_bitmaps(&a, &a.clone()));
        assert!(!rp.compare_bitmaps(&a, &b));
        assert!(rp.failures()[0].contains("(2, 1)"));
    }
}
