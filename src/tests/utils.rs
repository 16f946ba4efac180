use crate::db::connection::{init_db, Database};

/// Initialize a fresh test DB using the production schema. Each test gets
/// its own file under the OS temp dir; tests run on separate threads, so
/// the thread-local connection slot stays isolated per test.
pub fn init_test_db(name: &str) -> Database {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "ontario_rentals_test_{}_{}.sqlite3",
        std::process::id(),
        name
    ));
    let _ = std::fs::remove_file(&path);

    let db = Database::new(path.to_string_lossy().to_string());

    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    db
}
