//! Session state types shared across the workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The coarse phase of an interview session, derived from the controller's
/// flags and used for display and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No session running
    Idle,
    /// Waiting on the model for a question
    QuestionLoading,
    /// A question is displayed, waiting for an answer
    QuestionReady,
    /// The microphone is capturing the candidate's answer
    Listening,
    /// Waiting on the model for feedback
    FeedbackLoading,
    /// The synthesizer is reading a question or feedback aloud
    Speaking,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::QuestionLoading => "generating question",
            SessionPhase::QuestionReady => "awaiting answer",
            SessionPhase::Listening => "listening",
            SessionPhase::FeedbackLoading => "generating feedback",
            SessionPhase::Speaking => "speaking",
        };
        f.write_str(label)
    }
}

/// The role the candidate is interviewing for. Fixed once a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewRole {
    #[default]
    Sde,
    Hr,
    ProductManager,
    DataScientist,
    Other,
}

impl InterviewRole {
    /// All selectable roles, in display order.
    pub const ALL: [InterviewRole; 5] = [
        InterviewRole::Sde,
        InterviewRole::Hr,
        InterviewRole::ProductManager,
        InterviewRole::DataScientist,
        InterviewRole::Other,
    ];
}

impl fmt::Display for InterviewRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InterviewRole::Sde => "SDE",
            InterviewRole::Hr => "HR",
            InterviewRole::ProductManager => "Product Manager",
            InterviewRole::DataScientist => "Data Scientist",
            InterviewRole::Other => "Other",
        };
        f.write_str(label)
    }
}

impl FromStr for InterviewRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sde" => Ok(InterviewRole::Sde),
            "hr" => Ok(InterviewRole::Hr),
            "pm" | "product-manager" | "product manager" => Ok(InterviewRole::ProductManager),
            "ds" | "data-scientist" | "data scientist" => Ok(InterviewRole::DataScientist),
            "other" => Ok(InterviewRole::Other),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// The kind of interview round being practiced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewRound {
    #[default]
    Technical,
    Behavioral,
}

impl InterviewRound {
    /// All selectable rounds, in display order.
    pub const ALL: [InterviewRound; 2] = [InterviewRound::Technical, InterviewRound::Behavioral];
}

impl fmt::Display for InterviewRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InterviewRound::Technical => "Technical",
            InterviewRound::Behavioral => "Behavioral",
        };
        f.write_str(label)
    }
}

impl FromStr for InterviewRound {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "technical" | "tech" => Ok(InterviewRound::Technical),
            "behavioral" | "behavioural" => Ok(InterviewRound::Behavioral),
            other => Err(format!("unknown round: {other}")),
        }
    }
}
