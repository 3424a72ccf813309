use indexmap::map::Entry;
use indexmap::IndexMap;
use nonempty::NonEmpty;

use crate::outcome::{make_failure, make_success, Outcome};
use crate::planner::{FocusArea, Lesson, LessonKey, LessonUpdate};

/// The lessons in a study plan, in plan order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    lessons: Vec<Lesson>,
}

impl Catalog {
    pub fn new(lessons: impl IntoIterator<Item=Lesson>) -> Self {
        Catalog { lessons: lessons.into_iter().collect() }
    }

    /// The three lessons every plan starts with
    pub fn starter() -> Self {
        Catalog::new([
            Lesson::new(
                1,
                "Getting comfortable with basic syntax",
                20,
                FocusArea::Syntax,
                ["https://www.typescriptlang.org/docs/"]
            ),
            Lesson::new(
                2,
                "Understanding strict typing features",
                35,
                FocusArea::Types,
                ["https://www.typescriptlang.org/docs/handbook/2/everyday-types.html"]
            ),
            Lesson::new(
                3,
                "Exploring tooling & tsconfig",
                25,
                FocusArea::Tooling,
                ["https://aka.ms/tsconfig"]
            ),
        ])
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn get(&self, id: u32) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.id == id)
    }

    /// Apply `update` to the lesson with `id`. Fails if there's no such lesson.
    pub fn update_lesson(&mut self, id: u32, update: LessonUpdate) -> Outcome<&mut Lesson> {
        match self.lessons.iter_mut().find(|lesson| lesson.id == id) {
            None => make_failure(format!("Lesson with id {} not found", id)),
            Some(lesson) => {
                log::debug!("Updating lesson {} with {:?}", id, update);
                lesson.apply(update);
                make_success(lesson)
            }
        }
    }

    /// Group lessons by the value of `key`. Groups are in order of first appearance and lessons
    /// keep plan order within their group.
    pub fn group_by(&self, key: LessonKey) -> IndexMap<String, NonEmpty<&Lesson>> {
        let mut groups = IndexMap::<String, NonEmpty<&Lesson>>::new();
        for lesson in &self.lessons {
            match groups.entry(lesson.key(key)) {
                Entry::Vacant(entry) => {
                    entry.insert(NonEmpty::new(lesson));
                }
                Entry::Occupied(mut entry) => entry.get_mut().push(lesson)
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::planner::{Catalog, FocusArea, Lesson, LessonKey, LessonUpdate};

    #[test]
    fn starter_has_three_incomplete_lessons() {
        let catalog = Catalog::starter();
        let ids = catalog.lessons().iter().map(|lesson| lesson.id).collect::<Vec<_>>();
        assert_eq!(ids, [1, 2, 3]);
        assert!(catalog.lessons().iter().all(|lesson| !lesson.completed));
        assert_eq!(catalog.get(2).map(|lesson| lesson.duration_minutes), Some(35));
    }

    #[test]
    fn update_applies_in_place() {
        let mut catalog = Catalog::starter();
        let updated = catalog.update_lesson(2, LessonUpdate {
            duration_minutes: Some(40),
            ..LessonUpdate::default()
        });
        assert_eq!(updated.value().map(|lesson| lesson.duration_minutes), Some(40));
        assert_eq!(catalog.get(2).map(|lesson| lesson.duration_minutes), Some(40));
    }

    #[test]
    fn update_of_missing_lesson_fails() {
        let mut catalog = Catalog::starter();
        let updated = catalog.update_lesson(9, LessonUpdate::default());
        assert_eq!(updated.error(), Some("Lesson with id 9 not found"));
        assert_eq!(catalog, Catalog::starter());
    }

    #[test]
    fn group_by_focus_preserves_order() {
        let mut lessons = Catalog::starter().lessons().to_vec();
        lessons.push(Lesson::new(4, "Generics", 30, FocusArea::Types, Vec::<String>::new()));
        let catalog = Catalog::new(lessons);
        let groups = catalog.group_by(LessonKey::Focus);
        assert_eq!(groups.keys().collect::<Vec<_>>(), ["Syntax", "Types", "Tooling"]);
        let types = groups["Types"].iter().map(|lesson| lesson.id).collect::<Vec<_>>();
        assert_eq!(types, [2, 4]);
        assert!(!groups.contains_key("Patterns"));
    }

    #[test]
    fn group_by_completed_puts_everything_in_one_group() {
        let catalog = Catalog::starter();
        let groups = catalog.group_by(LessonKey::Completed);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["false"].len(), 3);
    }

    #[test]
    fn empty_catalog_has_no_groups() {
        assert!(Catalog::default().group_by(LessonKey::Id).is_empty());
    }
}
