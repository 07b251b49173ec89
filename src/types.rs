use std::fmt;
use std::path::PathBuf;

/// Three color tokens, handed to the external program in this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTriple {
    pub first: String,
    pub second: String,
    pub third: String,
}

impl ColorTriple {
    pub fn new(first: impl Into<String>, second: impl Into<String>, third: impl Into<String>) -> Self {
        ColorTriple {
            first: first.into(),
            second: second.into(),
            third: third.into(),
        }
    }

    pub fn tokens(&self) -> [&str; 3] {
        [self.first.as_str(), self.second.as_str(), self.third.as_str()]
    }
}

impl From<[String; 3]> for ColorTriple {
    fn from([first, second, third]: [String; 3]) -> Self {
        ColorTriple {
            first,
            second,
            third,
        }
    }
}

impl fmt::Display for ColorTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.first, self.second, self.third)
    }
}

#[derive(Debug)]
pub struct AppConfig {
    pub image_dir: PathBuf,
    pub colors_path: PathBuf,
    pub program: String,
    pub program_args: Vec<String>,
    pub extensions: Vec<String>,
    pub dry_run: bool,
    pub check_hex: bool,
    pub strict: bool,
}
