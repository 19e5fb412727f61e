use serde::{Deserialize, Serialize};

/// HCAHPS score bands used for badges and the comparison "best" annotation
///
/// Lower bounds are inclusive: a 90 is excellent, an 89 is merely good.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QualityLevel {
    /// Score 90-100
    Excellent,
    /// Score 80-89
    Good,
    /// Score 70-79
    Average,
    /// Score 0-69
    Poor,
}

impl QualityLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => QualityLevel::Excellent,
            80..=89 => QualityLevel::Good,
            70..=79 => QualityLevel::Average,
            _ => QualityLevel::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualityLevel::Excellent => "Excellent",
            QualityLevel::Good => "Good",
            QualityLevel::Average => "Average",
            QualityLevel::Poor => "Poor",
        }
    }

    pub fn color_code(&self) -> &'static str {
        match self {
            QualityLevel::Excellent => "green",
            QualityLevel::Good => "blue",
            QualityLevel::Average => "yellow",
            QualityLevel::Poor => "red",
        }
    }
}

impl std::fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
