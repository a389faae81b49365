use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{MealError, Result};
use crate::models::Meal;
use crate::state::codec::{
    decode_recipe_line, decode_wish_line, encode_recipe_line, encode_wish_line,
};

/// Default location of the wish-list file.
pub const DEFAULT_WISH_PATH: &str = "data/data.txt";

/// Default location of the recipes (master list) file.
pub const DEFAULT_RECIPES_PATH: &str = "data/mainlist.txt";

/// Where the two list files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub wish_path: PathBuf,
    pub recipes_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            wish_path: PathBuf::from(DEFAULT_WISH_PATH),
            recipes_path: PathBuf::from(DEFAULT_RECIPES_PATH),
        }
    }
}

/// A line that could not be decoded while loading.
#[derive(Debug)]
pub struct LineFailure {
    /// 1-based line number in the source file.
    pub line: usize,
    pub error: MealError,
}

/// Outcome of loading a list file: the meals that decoded, plus every line
/// that was skipped because it was malformed.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub meals: Vec<Meal>,
    pub failures: Vec<LineFailure>,
}

/// File-backed storage for the recipes and wish lists.
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Create both files (and their parent directories) if they do not exist.
    pub fn ensure_files(&self) -> Result<()> {
        ensure_file(&self.config.wish_path)?;
        ensure_file(&self.config.recipes_path)?;
        Ok(())
    }

    pub fn load_recipes(&self) -> Result<LoadReport> {
        load_lines(&self.config.recipes_path, decode_recipe_line)
    }

    pub fn load_wish_list(&self) -> Result<LoadReport> {
        load_lines(&self.config.wish_path, decode_wish_line)
    }

    /// Append one meal to the recipes file.
    pub fn append_recipe(&self, meal: &Meal) -> Result<()> {
        let line = encode_recipe_line(meal)?;
        append_line(&self.config.recipes_path, &line)
    }

    /// Append one meal to the wish-list file.
    pub fn append_wish(&self, meal: &Meal) -> Result<()> {
        let line = encode_wish_line(meal)?;
        append_line(&self.config.wish_path, &line)
    }

    /// Replace the wish-list file with the given meals.
    pub fn save_wish_list<'a>(&self, meals: impl IntoIterator<Item = &'a Meal>) -> Result<()> {
        let mut content = String::new();
        for meal in meals {
            content.push_str(&encode_wish_line(meal)?);
            content.push('\n');
        }
        fs::write(&self.config.wish_path, content)?;
        Ok(())
    }

    /// Truncate the wish-list file.
    pub fn clear_wish_list(&self) -> Result<()> {
        File::create(&self.config.wish_path)?;
        debug!(path = %self.config.wish_path.display(), "cleared wish list file");
        Ok(())
    }
}

fn ensure_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        File::create(path)?;
        debug!(path = %path.display(), "created list file");
    }
    Ok(())
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// Decode a file line by line, collecting meals and skipping malformed lines.
///
/// A missing file loads as empty. Lines that are not valid UTF-8 are skipped
/// like any other malformed line; only read errors abort the load.
fn load_lines<F>(path: &Path, decode: F) -> Result<LoadReport>
where
    F: Fn(&str) -> Result<Option<Meal>>,
{
    let mut report = LoadReport::default();
    if !path.exists() {
        return Ok(report);
    }

    let reader = BufReader::new(File::open(path)?);
    for (i, bytes) in reader.split(b'\n').enumerate() {
        let decoded = String::from_utf8(bytes?)
            .map_err(MealError::from)
            .and_then(|line| decode(&line));
        match decoded {
            Ok(Some(meal)) => report.meals.push(meal),
            Ok(None) => {}
            Err(error) => {
                warn!(path = %path.display(), line = i + 1, %error, "skipping malformed line");
                report.failures.push(LineFailure { line: i + 1, error });
            }
        }
    }

    debug!(
        path = %path.display(),
        loaded = report.meals.len(),
        skipped = report.failures.len(),
        "loaded meals"
    );
    Ok(report)
}
