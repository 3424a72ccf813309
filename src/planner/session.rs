use std::thread::sleep;
use std::time::Duration;

use chrono::Local;

use crate::outcome::{make_failure, make_success, Outcome};
use crate::planner::{Catalog, Lesson, LessonUpdate};

/// How a study session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long the session takes before it reports back
    pub delay: Duration,
    /// Sessions for lessons longer than this fail
    pub max_minutes: u32,
}

const DEFAULT_DELAY: Duration = Duration::from_millis(250);
const DEFAULT_MAX_MINUTES: u32 = 40;

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            delay: DEFAULT_DELAY,
            max_minutes: DEFAULT_MAX_MINUTES,
        }
    }
}

/// Study `lesson`: after `config.delay`, fail if it's too long, otherwise mark it completed with a
/// note of today's date.
pub fn simulate_study_session<'a>(lesson: &'a mut Lesson, config: &SessionConfig) -> Outcome<&'a Lesson> {
    sleep(config.delay);

    if lesson.duration_minutes > config.max_minutes {
        log::warn!(
            "Lesson {} is {} mins, over the {} min limit",
            lesson.id,
            lesson.duration_minutes,
            config.max_minutes
        );
        return make_failure("Session too long — take a break first!");
    }

    lesson.completed = true;
    lesson.notes = Some(format!("Completed on {}", Local::now().date_naive()));
    make_success(lesson)
}

/// Update lesson `id` then run a study session on it, returning the completed lesson.
///
/// The first failure (missing lesson, or session too long) is returned as is.
pub fn study(
    catalog: &mut Catalog,
    id: u32,
    update: LessonUpdate,
    config: &SessionConfig
) -> Outcome<Lesson> {
    log::info!("Studying lesson {}", id);
    catalog.update_lesson(id, update)
        .and_then(|lesson| simulate_study_session(lesson, config))
        .map(Lesson::clone)
}
