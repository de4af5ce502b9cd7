
/// Database tests run only against an explicitly configured database.
pub(crate) fn db_tests_disabled() -> bool {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return true;
    }
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip database tests");
        return true;
    }
    false
}
