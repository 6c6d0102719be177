#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use tasktally::db::db::Db;
    use tasktally::db::projects::Projects;
    use tasktally::db::schema::Schema;
    use tasktally::libs::error::Error;
    use tasktally::libs::project::ProjectSpec;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct SchemaTestContext {
        temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for SchemaTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("tasktally.db"));
            SchemaTestContext { temp_dir, db }
        }
    }

    #[test_context(SchemaTestContext)]
    #[test]
    fn test_initialize_creates_all_tables(ctx: &mut SchemaTestContext) {
        let schema = Schema::new(ctx.db.clone());
        schema.initialize().unwrap();
        schema.verify().unwrap();
    }

    #[test_context(SchemaTestContext)]
    #[test]
    fn test_initialize_is_idempotent(ctx: &mut SchemaTestContext) {
        let schema = Schema::new(ctx.db.clone());
        schema.initialize().unwrap();
        let projects = Projects::new(ctx.db.clone());
        projects.create(&ProjectSpec::new("Garden").unwrap()).unwrap();

        schema.initialize().unwrap();
        schema.verify().unwrap();
        assert_eq!(projects.count().unwrap(), 1);
    }

    #[test_context(SchemaTestContext)]
    #[test]
    fn test_verify_fails_on_empty_database(ctx: &mut SchemaTestContext) {
        let result = Schema::new(ctx.db.clone()).verify();
        assert!(matches!(result, Err(Error::NotInitialized(_))));
    }

    #[test_context(SchemaTestContext)]
    #[test]
    fn test_verify_catches_partial_schema(ctx: &mut SchemaTestContext) {
        let conn = Connection::open(ctx.db.path()).unwrap();
        conn.execute("CREATE TABLE projects (id INTEGER PRIMARY KEY, name TEXT)", []).unwrap();
        drop(conn);

        match Schema::new(ctx.db.clone()).verify() {
            Err(Error::NotInitialized(message)) => assert!(message.contains("tasks")),
            other => panic!("expected NotInitialized, got {other:?}"),
        }
    }

    #[test_context(SchemaTestContext)]
    #[test]
    fn test_missing_directory_is_unavailable(ctx: &mut SchemaTestContext) {
        let db = Db::open(ctx.temp_dir.path().join("missing").join("tasktally.db"));
        let result = Schema::new(db).initialize();
        assert!(matches!(result, Err(Error::StoreUnavailable { .. })));
    }

    #[test_context(SchemaTestContext)]
    #[test]
    fn test_connections_enforce_foreign_keys(ctx: &mut SchemaTestContext) {
        Schema::new(ctx.db.clone()).initialize().unwrap();
        let conn = ctx.db.connect().unwrap();
        let enabled: bool = conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0)).unwrap();
        assert!(enabled);
    }
}
