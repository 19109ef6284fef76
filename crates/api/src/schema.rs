//! Request and Response Schemas
//!
//! Typed request body for the predict endpoint, with the same enumerated
//! field domains and numeric ranges the prediction model was trained
//! against. Malformed values are rejected here, before the pipeline.

use feature_engine::Record;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A field value outside its allowed numeric range.
#[derive(Debug, Clone, Error)]
#[error("{field} value {value} is out of range [{min}, {max}]")]
pub struct RangeError {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

/// Student gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Course level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Course {
    Diploma,
    Undergraduate,
    Postgraduate,
    Phd,
    Certificate,
    Professional,
    Vocational,
}

/// Internet availability at home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InternetAccess {
    Yes,
    No,
}

/// Self-reported sleep quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Poor,
    Average,
    Good,
}

/// Primary study method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StudyMethod {
    Coaching,
    SelfStudy,
    GroupStudy,
    Online,
    Tutoring,
}

/// Campus facility rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityRating {
    Low,
    Moderate,
    High,
}

/// Perceived exam difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamDifficulty {
    Hard,
    Moderate,
    Easy,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl Course {
    pub fn as_str(&self) -> &'static str {
        match self {
            Course::Diploma => "diploma",
            Course::Undergraduate => "undergraduate",
            Course::Postgraduate => "postgraduate",
            Course::Phd => "phd",
            Course::Certificate => "certificate",
            Course::Professional => "professional",
            Course::Vocational => "vocational",
        }
    }
}

impl InternetAccess {
    pub fn as_str(&self) -> &'static str {
        match self {
            InternetAccess::Yes => "yes",
            InternetAccess::No => "no",
        }
    }
}

impl SleepQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            SleepQuality::Poor => "poor",
            SleepQuality::Average => "average",
            SleepQuality::Good => "good",
        }
    }
}

impl StudyMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudyMethod::Coaching => "coaching",
            StudyMethod::SelfStudy => "self-study",
            StudyMethod::GroupStudy => "group-study",
            StudyMethod::Online => "online",
            StudyMethod::Tutoring => "tutoring",
        }
    }
}

impl FacilityRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacilityRating::Low => "low",
            FacilityRating::Moderate => "moderate",
            FacilityRating::High => "high",
        }
    }
}

impl ExamDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamDifficulty::Hard => "hard",
            ExamDifficulty::Moderate => "moderate",
            ExamDifficulty::Easy => "easy",
        }
    }
}

/// Predict request body: one student's demographic and study-habit profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub age: u32,
    pub gender: Gender,
    pub course: Course,
    pub study_hours: f64,
    pub class_attendance: f64,
    pub internet_access: InternetAccess,
    pub sleep_hours: f64,
    pub sleep_quality: SleepQuality,
    pub study_method: StudyMethod,
    pub facility_rating: FacilityRating,
    pub exam_difficulty: ExamDifficulty,
}

impl StudentProfile {
    /// Check numeric fields against their allowed ranges.
    pub fn validate(&self) -> Result<(), RangeError> {
        check_range("age", self.age as f64, 10.0, 100.0)?;
        check_range("study_hours", self.study_hours, 0.0, 24.0)?;
        check_range("class_attendance", self.class_attendance, 0.0, 100.0)?;
        check_range("sleep_hours", self.sleep_hours, 0.0, 24.0)?;
        Ok(())
    }

    /// Convert into the record shape the pipeline consumes.
    pub fn into_record(self) -> Record {
        Record::new()
            .with("age", self.age as f64)
            .with("gender", self.gender.as_str())
            .with("course", self.course.as_str())
            .with("study_hours", self.study_hours)
            .with("class_attendance", self.class_attendance)
            .with("internet_access", self.internet_access.as_str())
            .with("sleep_hours", self.sleep_hours)
            .with("sleep_quality", self.sleep_quality.as_str())
            .with("study_method", self.study_method.as_str())
            .with("facility_rating", self.facility_rating.as_str())
            .with("exam_difficulty", self.exam_difficulty.as_str())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), RangeError> {
    if value < min || value > max {
        Err(RangeError {
            field,
            value,
            min,
            max,
        })
    } else {
        Ok(())
    }
}

/// Predict response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub exam_score: f64,
    pub confidence_level: String,
    pub pass_probability: f64,
}

impl PredictionResponse {
    /// Build the response for a predicted score, deriving the presentation
    /// fields from it.
    pub fn from_score(score: f64) -> Self {
        Self {
            exam_score: score,
            confidence_level: confidence_level(score).to_string(),
            pass_probability: pass_probability(score),
        }
    }
}

/// Heuristic pass probability: `clamp((score - 20) / 80, 0, 1)`, rounded to
/// 2 decimals. Presentation only; the regressor emits no probability.
pub fn pass_probability(score: f64) -> f64 {
    let raw = ((score - 20.0) / 80.0).clamp(0.0, 1.0);
    (raw * 100.0).round() / 100.0
}

/// "High" for scores inside the valid exam range, "Low (Outlier)" otherwise.
pub fn confidence_level(score: f64) -> &'static str {
    if (0.0..=100.0).contains(&score) {
        "High"
    } else {
        "Low (Outlier)"
    }
}
