use std::fmt::{Display, Formatter};

use derive_more::Display;
use serde_json::{json, Value};

/// What a lesson is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum FocusArea {
    Syntax,
    Types,
    Tooling,
    Patterns,
}

/// A lesson in the study plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub id: u32,
    pub title: String,
    pub duration_minutes: u32,
    pub focus: FocusArea,
    pub resources: Vec<String>,
    pub completed: bool,
    pub notes: Option<String>,
}

/// Partial update of a [Lesson]: every field except `id`, and only the present ones are applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonUpdate {
    pub title: Option<String>,
    pub duration_minutes: Option<u32>,
    pub focus: Option<FocusArea>,
    pub resources: Option<Vec<String>>,
    pub completed: Option<bool>,
    pub notes: Option<String>,
}

/// A [Lesson] field to group by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LessonKey {
    Id,
    Title,
    DurationMinutes,
    Focus,
    Resources,
    Completed,
    Notes,
}

impl Lesson {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        duration_minutes: u32,
        focus: FocusArea,
        resources: impl IntoIterator<Item=impl Into<String>>
    ) -> Self {
        Lesson {
            id,
            title: title.into(),
            duration_minutes,
            focus,
            resources: resources.into_iter().map(Into::into).collect(),
            completed: false,
            notes: None,
        }
    }

    /// Overwrite the fields present in `update`
    pub fn apply(&mut self, update: LessonUpdate) {
        let LessonUpdate { title, duration_minutes, focus, resources, completed, notes } = update;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(duration_minutes) = duration_minutes {
            self.duration_minutes = duration_minutes;
        }
        if let Some(focus) = focus {
            self.focus = focus;
        }
        if let Some(resources) = resources {
            self.resources = resources;
        }
        if let Some(completed) = completed {
            self.completed = completed;
        }
        if let Some(notes) = notes {
            self.notes = Some(notes);
        }
    }

    /// The value of `key` as a group name. Lists are comma-joined, missing notes are `"none"`.
    pub fn key(&self, key: LessonKey) -> String {
        match key {
            LessonKey::Id => self.id.to_string(),
            LessonKey::Title => self.title.clone(),
            LessonKey::DurationMinutes => self.duration_minutes.to_string(),
            LessonKey::Focus => self.focus.to_string(),
            LessonKey::Resources => self.resources.join(","),
            LessonKey::Completed => self.completed.to_string(),
            LessonKey::Notes => self.notes.clone().unwrap_or_else(|| "none".to_string())
        }
    }

    /// Summary table, one entry per field
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "durationMinutes": self.duration_minutes,
            "focus": self.focus.to_string(),
            "resources": self.resources,
            "completed": self.completed,
            "notes": self.notes,
        })
    }
}

impl Display for Lesson {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {} ({} mins)", self.id, self.title, self.duration_minutes)
    }
}
