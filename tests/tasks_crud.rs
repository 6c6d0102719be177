#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tasktally::db::db::Db;
    use tasktally::db::projects::Projects;
    use tasktally::db::schema::Schema;
    use tasktally::db::tasks::Tasks;
    use tasktally::libs::error::Error;
    use tasktally::libs::project::ProjectSpec;
    use tasktally::libs::task::{Priority, TaskSpec, TaskUpdate};
    use tasktally::libs::task_tree::TaskTree;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TaskTestContext {
        _temp_dir: TempDir,
        tasks: Tasks,
        project_id: i64,
        other_project_id: i64,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("tasktally.db"));
            Schema::new(db.clone()).initialize().unwrap();
            let projects = Projects::new(db.clone());
            let project_id = projects.create(&ProjectSpec::new("Home").unwrap()).unwrap().id;
            let other_project_id = projects.create(&ProjectSpec::new("Work").unwrap()).unwrap().id;
            TaskTestContext {
                _temp_dir: temp_dir,
                tasks: Tasks::new(db),
                project_id,
                other_project_id,
            }
        }
    }

    fn spec(name: &str) -> TaskSpec {
        TaskSpec::new(name, false).unwrap()
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_and_get_task(ctx: &mut TaskTestContext) {
        let due = Utc.with_ymd_and_hms(2026, 11, 2, 9, 0, 0).unwrap();
        let created = ctx
            .tasks
            .create(ctx.project_id, &spec("Fix the Fence").priority(Priority::High).due_at(due))
            .unwrap();

        let fetched = ctx.tasks.get(created.id).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name(), "Fix the Fence");
        assert_eq!(fetched.fulltext, "fixthefence");
        assert_eq!(fetched.spec.priority, Priority::High);
        assert_eq!(fetched.spec.due_at, Some(due));
        assert_eq!(fetched.project_id, ctx.project_id);
        assert!(!fetched.completed());
        assert!(fetched.spec.done_at.is_none());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_completed_task_is_stamped_done(ctx: &mut TaskTestContext) {
        let task = ctx.tasks.create(ctx.project_id, &TaskSpec::new("Water plants", true).unwrap()).unwrap();
        assert!(task.spec.done_at.is_some());
        assert!(ctx.tasks.get(task.id).unwrap().spec.done_at.is_some());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_rejects_unknown_project_and_parent(ctx: &mut TaskTestContext) {
        assert!(matches!(
            ctx.tasks.create(999, &spec("Orphan")),
            Err(Error::NotFound { entity: "project", id: 999 })
        ));
        assert!(matches!(
            ctx.tasks.create(ctx.project_id, &spec("Orphan").parent(77).unwrap()),
            Err(Error::NotFound { entity: "task", id: 77 })
        ));
        assert!(matches!(ctx.tasks.create(0, &spec("Orphan")), Err(Error::Validation(_))));
        assert_eq!(ctx.tasks.count().unwrap(), 0);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_get_unknown_task(ctx: &mut TaskTestContext) {
        assert!(matches!(ctx.tasks.get(5), Err(Error::NotFound { entity: "task", id: 5 })));
        assert!(matches!(ctx.tasks.get(-1), Err(Error::Validation(_))));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_name_and_completion(ctx: &mut TaskTestContext) {
        let task = ctx.tasks.create(ctx.project_id, &spec("Paint shed")).unwrap();

        let renamed = ctx.tasks.update(task.id, &TaskUpdate::new(Some("Paint the Shed"), None).unwrap()).unwrap();
        assert_eq!(renamed.name(), "Paint the Shed");
        assert_eq!(renamed.fulltext, "painttheshed");
        assert!(!renamed.completed());

        let done = ctx.tasks.update(task.id, &TaskUpdate::new(None, Some(true)).unwrap()).unwrap();
        assert!(done.completed());
        assert!(done.spec.done_at.is_some());
        assert_eq!(done.name(), "Paint the Shed");

        let reopened = ctx.tasks.update(task.id, &TaskUpdate::new(None, Some(false)).unwrap()).unwrap();
        assert!(reopened.spec.done_at.is_none());
        assert_eq!(ctx.tasks.get(task.id).unwrap(), reopened);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_unknown_task(ctx: &mut TaskTestContext) {
        let update = TaskUpdate::new(Some("Anything"), None).unwrap();
        assert!(matches!(ctx.tasks.update(404, &update), Err(Error::NotFound { entity: "task", .. })));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_remove_task(ctx: &mut TaskTestContext) {
        let task = ctx.tasks.create(ctx.project_id, &spec("Sweep")).unwrap();

        ctx.tasks.remove(task.id).unwrap();
        assert!(matches!(ctx.tasks.get(task.id), Err(Error::NotFound { .. })));
        assert!(matches!(ctx.tasks.remove(task.id), Err(Error::NotFound { entity: "task", .. })));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_remove_parent_cascades_to_children(ctx: &mut TaskTestContext) {
        let parent = ctx.tasks.create(ctx.project_id, &spec("Renovate")).unwrap();
        let child = ctx.tasks.create(ctx.project_id, &spec("Sand walls").parent(parent.id).unwrap()).unwrap();

        assert_eq!(ctx.tasks.list_children(parent.id).unwrap(), vec![child.clone()]);
        ctx.tasks.remove(parent.id).unwrap();
        assert!(ctx.tasks.get(child.id).is_err());
        assert_eq!(ctx.tasks.count().unwrap(), 0);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_list_by_project_and_search(ctx: &mut TaskTestContext) {
        ctx.tasks.create(ctx.project_id, &spec("Mow lawn")).unwrap();
        ctx.tasks.create(ctx.project_id, &spec("Buy lawnmower")).unwrap();
        ctx.tasks.create(ctx.other_project_id, &spec("Lawn report")).unwrap();

        let home: Vec<String> = ctx
            .tasks
            .list_by_project(ctx.project_id, 10)
            .unwrap()
            .into_iter()
            .map(|t| t.spec.name)
            .collect();
        assert_eq!(home, vec!["Buy lawnmower", "Mow lawn"]);

        let found: Vec<String> = ctx.tasks.search("LAWN", 10).unwrap().into_iter().map(|t| t.spec.name).collect();
        assert_eq!(found, vec!["Buy lawnmower", "Lawn report", "Mow lawn"]);
        assert_eq!(ctx.tasks.list(2).unwrap().len(), 2);
        assert!(ctx.tasks.search("garage", 10).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_import_keeps_order_in_one_batch(ctx: &mut TaskTestContext) {
        let specs = vec![spec("First"), spec("Second"), TaskSpec::new("Third", true).unwrap()];

        assert_eq!(ctx.tasks.import(ctx.project_id, &specs).unwrap(), 3);
        let ids: Vec<i64> = ctx.tasks.list(10).unwrap().iter().map(|t| t.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        let by_id: Vec<String> = sorted.iter().map(|id| ctx.tasks.get(*id).unwrap().spec.name).collect();
        assert_eq!(by_id, vec!["First", "Second", "Third"]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_import_into_missing_project_inserts_nothing(ctx: &mut TaskTestContext) {
        let result = ctx.tasks.import(999, &[spec("First"), spec("Second")]);
        assert!(matches!(result, Err(Error::NotFound { entity: "project", .. })));
        assert_eq!(ctx.tasks.count().unwrap(), 0);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_tree_from_stored_tasks(ctx: &mut TaskTestContext) {
        let garden = ctx.tasks.create(ctx.project_id, &spec("Garden")).unwrap();
        let beds = ctx.tasks.create(ctx.project_id, &spec("Beds").parent(garden.id).unwrap()).unwrap();
        ctx.tasks.create(ctx.project_id, &spec("Compost").parent(beds.id).unwrap()).unwrap();
        ctx.tasks.create(ctx.project_id, &spec("Attic")).unwrap();

        let tree = TaskTree::new(ctx.tasks.list_by_project(ctx.project_id, 50).unwrap());
        let walked: Vec<(usize, &str)> = tree.walk().into_iter().map(|(depth, t)| (depth, t.name())).collect();
        assert_eq!(walked, vec![(0, "Attic"), (0, "Garden"), (1, "Beds"), (2, "Compost")]);
        assert!(tree.detached().is_empty());
    }
}
