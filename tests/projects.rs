#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use tasktally::db::db::Db;
    use tasktally::db::projects::Projects;
    use tasktally::db::schema::Schema;
    use tasktally::db::tasks::Tasks;
    use tasktally::db::timelogs::Timelogs;
    use tasktally::libs::error::Error;
    use tasktally::libs::project::ProjectSpec;
    use tasktally::libs::task::TaskSpec;
    use tasktally::libs::timelog::TimelogSpec;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ProjectTestContext {
        _temp_dir: TempDir,
        db: Db,
        projects: Projects,
    }

    impl TestContext for ProjectTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("tasktally.db"));
            Schema::new(db.clone()).initialize().unwrap();
            let projects = Projects::new(db.clone());
            ProjectTestContext {
                _temp_dir: temp_dir,
                db,
                projects,
            }
        }
    }

    fn spec(name: &str) -> ProjectSpec {
        ProjectSpec::new(name).unwrap()
    }

    fn current_rows(db: &Db) -> i64 {
        let conn = Connection::open(db.path()).unwrap();
        conn.query_row("SELECT COUNT(*) FROM projects WHERE is_current = 1", [], |row| row.get(0))
            .unwrap()
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_default_project_inserted_once(ctx: &mut ProjectTestContext) {
        let first = ctx.projects.insert_default_if_none_exists(&spec("Inbox")).unwrap();
        let second = ctx.projects.insert_default_if_none_exists(&spec("Inbox")).unwrap();

        let first = first.unwrap();
        assert!(first.is_current);
        assert!(second.is_none());
        assert_eq!(ctx.projects.count().unwrap(), 1);
        assert_eq!(ctx.projects.get_current().unwrap().unwrap().id, first.id);
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_default_project_skipped_when_projects_exist(ctx: &mut ProjectTestContext) {
        ctx.projects.create(&spec("Garden")).unwrap();
        assert!(ctx.projects.insert_default_if_none_exists(&spec("Inbox")).unwrap().is_none());
        assert_eq!(ctx.projects.count().unwrap(), 1);
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_first_created_project_becomes_current(ctx: &mut ProjectTestContext) {
        let garden = ctx.projects.create(&spec("Garden")).unwrap();
        let kitchen = ctx.projects.create(&spec("Kitchen")).unwrap();

        assert!(garden.is_current);
        assert!(!kitchen.is_current);
        assert_eq!(current_rows(&ctx.db), 1);
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_set_current_moves_the_flag(ctx: &mut ProjectTestContext) {
        ctx.projects.create(&spec("Garden")).unwrap();
        let kitchen = ctx.projects.create(&spec("Kitchen")).unwrap();

        let updated = ctx.projects.set_current(kitchen.id).unwrap();
        assert!(updated.is_current);
        assert_eq!(ctx.projects.get_current().unwrap().unwrap().id, kitchen.id);
        assert_eq!(current_rows(&ctx.db), 1);
        assert!(ctx.projects.has_current().unwrap());
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_set_current_unknown_id_rolls_back(ctx: &mut ProjectTestContext) {
        let garden = ctx.projects.create(&spec("Garden")).unwrap();
        ctx.projects.create(&spec("Kitchen")).unwrap();

        let result = ctx.projects.set_current(999);
        assert!(matches!(result, Err(Error::State(_))));
        assert_eq!(ctx.projects.get_current().unwrap().unwrap().id, garden.id);
        assert_eq!(current_rows(&ctx.db), 1);
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_two_current_rows_is_an_integrity_error(ctx: &mut ProjectTestContext) {
        ctx.projects.create(&spec("Garden")).unwrap();
        ctx.projects.create(&spec("Kitchen")).unwrap();
        let conn = Connection::open(ctx.db.path()).unwrap();
        conn.execute("UPDATE projects SET is_current = 1", []).unwrap();

        assert!(matches!(ctx.projects.get_current(), Err(Error::Integrity(_))));
        assert!(matches!(ctx.projects.has_current(), Err(Error::Integrity(_))));
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_remove_refuses_current_project(ctx: &mut ProjectTestContext) {
        let garden = ctx.projects.create(&spec("Garden")).unwrap();

        assert!(matches!(ctx.projects.remove(garden.id), Err(Error::State(_))));
        assert_eq!(ctx.projects.count().unwrap(), 1);
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_remove_cascades_to_tasks_and_timelogs(ctx: &mut ProjectTestContext) {
        let tasks = Tasks::new(ctx.db.clone());
        let timelogs = Timelogs::new(ctx.db.clone());
        let garden = ctx.projects.create(&spec("Garden")).unwrap();
        let kitchen = ctx.projects.create(&spec("Kitchen")).unwrap();

        let oven = tasks.create(kitchen.id, &TaskSpec::new("Clean oven", false).unwrap()).unwrap();
        let kept = tasks.create(garden.id, &TaskSpec::new("Pull weeds", false).unwrap()).unwrap();
        let now = chrono::Utc::now();
        timelogs.create(&TimelogSpec::new(oven.id, now, now).unwrap()).unwrap();
        timelogs.create(&TimelogSpec::new(kept.id, now, now).unwrap()).unwrap();

        ctx.projects.remove(kitchen.id).unwrap();

        assert!(matches!(ctx.projects.get(kitchen.id), Err(Error::NotFound { entity: "project", .. })));
        assert!(matches!(tasks.get(oven.id), Err(Error::NotFound { entity: "task", .. })));
        assert_eq!(timelogs.count_by_task(oven.id).unwrap(), 0);
        assert_eq!(tasks.count().unwrap(), 1);
        assert_eq!(timelogs.count().unwrap(), 1);
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_remove_unknown_project(ctx: &mut ProjectTestContext) {
        assert!(matches!(ctx.projects.remove(42), Err(Error::NotFound { entity: "project", id: 42 })));
        assert!(matches!(ctx.projects.remove(0), Err(Error::Validation(_))));
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_search_matches_substring_ordered_by_name(ctx: &mut ProjectTestContext) {
        for name in ["Web Development", "Mobile webapp", "Web Design", "Desktop Application"] {
            ctx.projects.create(&spec(name)).unwrap();
        }

        let found: Vec<String> = ctx
            .projects
            .search("web", 10)
            .unwrap()
            .into_iter()
            .map(|p| p.spec.name)
            .collect();
        assert_eq!(found, vec!["Mobile webapp", "Web Design", "Web Development"]);
        assert_eq!(ctx.projects.search("WEB", 2).unwrap().len(), 2);
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_search_ignores_accents(ctx: &mut ProjectTestContext) {
        ctx.projects.create(&spec("Café Menu")).unwrap();

        assert_eq!(ctx.projects.search("cafe", 10).unwrap().len(), 1);
        assert_eq!(ctx.projects.search("CAFÉ", 10).unwrap().len(), 1);
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_list_is_ordered_and_limited(ctx: &mut ProjectTestContext) {
        for name in ["Zeta", "Alpha", "Mu"] {
            ctx.projects.create(&spec(name)).unwrap();
        }

        let names: Vec<String> = ctx.projects.list(2).unwrap().into_iter().map(|p| p.spec.name).collect();
        assert_eq!(names, vec!["Alpha", "Mu"]);
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_update_name_recomputes_fulltext(ctx: &mut ProjectTestContext) {
        let project = ctx.projects.create(&spec("Garden")).unwrap();

        let renamed = ctx.projects.update_name(project.id, "Élysée Garden").unwrap();
        assert_eq!(renamed.spec.name, "Élysée Garden");
        assert_eq!(renamed.fulltext, "elyseegarden");
        assert!(renamed.is_current);
        assert_eq!(ctx.projects.search("elysee", 10).unwrap().len(), 1);
        assert!(ctx.projects.update_name(99, "Other").is_err());
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_duplicate_name_is_a_conflict(ctx: &mut ProjectTestContext) {
        ctx.projects.create(&spec("Garden")).unwrap();
        let kitchen = ctx.projects.create(&spec("Kitchen")).unwrap();

        assert!(matches!(ctx.projects.create(&spec("Garden")), Err(Error::Conflict(_))));
        assert!(matches!(ctx.projects.update_name(kitchen.id, "Garden"), Err(Error::Conflict(_))));
    }
}
