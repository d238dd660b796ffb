use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

const CREATE_SUPPLIERS: &str = r#"
    CREATE TABLE suppliers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        company_name TEXT NOT NULL,
        contact_name TEXT,
        contact_title TEXT,
        city TEXT,
        country TEXT,
        phone TEXT,
        fax TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT
    );
"#;

const CREATE_CUSTOMERS: &str = r#"
    CREATE TABLE customers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        city TEXT,
        country TEXT,
        address1 TEXT,
        address2 TEXT,
        state TEXT,
        zip_code TEXT,
        phone TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT
    );
"#;

const CREATE_PRODUCTS: &str = r#"
    CREATE TABLE products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        product_name TEXT NOT NULL,
        supplier_id INTEGER NOT NULL REFERENCES suppliers(id),
        unit_price REAL NOT NULL DEFAULT 0,
        package TEXT,
        is_discontinued INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT
    );
"#;

const CREATE_ORDERS: &str = r#"
    CREATE TABLE orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        order_number TEXT NOT NULL,
        order_date TEXT NOT NULL,
        customer_id INTEGER NOT NULL REFERENCES customers(id),
        total_amount REAL NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT
    );
"#;

const CREATE_ORDER_ITEMS: &str = r#"
    CREATE TABLE order_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        order_id INTEGER NOT NULL REFERENCES orders(id),
        product_id INTEGER NOT NULL REFERENCES products(id),
        unit_price REAL NOT NULL DEFAULT 0,
        quantity INTEGER NOT NULL DEFAULT 1
    );
"#;

const CREATE_SYS_USERS: &str = r#"
    CREATE TABLE sys_users (
        id TEXT PRIMARY KEY NOT NULL,
        username TEXT NOT NULL UNIQUE,
        email TEXT,
        password_hash TEXT NOT NULL,
        full_name TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        is_admin INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        last_login_at TEXT,
        created_by TEXT
    );
"#;

const CREATE_SYS_REFRESH_TOKENS: &str = r#"
    CREATE TABLE sys_refresh_tokens (
        id TEXT PRIMARY KEY NOT NULL,
        user_id TEXT NOT NULL,
        token_hash TEXT NOT NULL,
        expires_at TEXT NOT NULL,
        created_at TEXT NOT NULL,
        revoked_at TEXT
    );
"#;

const CREATE_SYS_SETTINGS: &str = r#"
    CREATE TABLE sys_settings (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL,
        description TEXT,
        created_at TEXT,
        updated_at TEXT
    );
"#;

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    if DB_CONN.get().is_some() {
        return Ok(());
    }

    let db_file = db_path.unwrap_or("target/db/app.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    create_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Minimal schema bootstrap: every table is created only if absent, so
/// startup against an existing database is a no-op.
async fn create_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    ensure_table(conn, "suppliers", CREATE_SUPPLIERS).await?;
    ensure_table(conn, "customers", CREATE_CUSTOMERS).await?;
    ensure_table(conn, "products", CREATE_PRODUCTS).await?;
    ensure_table(conn, "orders", CREATE_ORDERS).await?;
    ensure_table(conn, "order_items", CREATE_ORDER_ITEMS).await?;
    ensure_table(conn, "sys_users", CREATE_SYS_USERS).await?;
    ensure_table(conn, "sys_refresh_tokens", CREATE_SYS_REFRESH_TOKENS).await?;
    ensure_table(conn, "sys_settings", CREATE_SYS_SETTINGS).await?;
    Ok(())
}

async fn ensure_table(
    conn: &DatabaseConnection,
    name: &str,
    create_sql: &str,
) -> anyhow::Result<()> {
    let existing = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?",
            [name.into()],
        ))
        .await?;

    if existing.is_empty() {
        tracing::info!("Creating {} table", name);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_sql.to_string(),
        ))
        .await?;
    }
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
