//! Shared metadata fixtures, one realistic schema per dialect

#![allow(dead_code)]

use typegen::{Column, DatabaseMetadata, Enum, Table};

/// PostgreSQL: enums in two schemas, a view, a partition, helpers, comments
pub fn postgres_blog() -> DatabaseMetadata {
    DatabaseMetadata::new(
        vec![
            Table::new("public", "users")
                .comment("Registered accounts")
                .column(Column::new("id", "int8").auto_increment())
                .column(Column::new("email", "citext").comment("Unique, case-insensitive"))
                .column(Column::new("role", "role").with_default())
                .column(Column::new("settings", "jsonb").nullable())
                .column(Column::new("created_at", "timestamptz").with_default()),
            Table::new("public", "posts")
                .column(Column::new("id", "int4").auto_increment())
                .column(Column::new("author_id", "int8"))
                .column(Column::new("tags", "_text"))
                .column(
                    Column::new("visibility", "text").check(
                        "CHECK ((visibility = ANY (ARRAY['public'::text, 'unlisted'::text, 'private'::text])))",
                    ),
                )
                .column(Column::new("pinned", "int2").check("CHECK ((pinned = ANY (ARRAY[0, 1])))")),
            Table::new("public", "published_posts")
                .view()
                .column(Column::new("id", "int4").nullable())
                .column(Column::new("title", "text").nullable()),
            Table::new("public", "events_2024").partition().column(Column::new("id", "int4")),
            Table::new("billing", "invoices")
                .column(Column::new("id", "uuid").with_default())
                .column(Column::new("amount", "numeric"))
                .column(Column::new("status", "status").type_schema("billing")),
        ],
        vec![
            Enum::new("public", "role", ["admin", "member"]),
            Enum::new("billing", "status", ["open", "paid", "void"]),
        ],
    )
}

/// MySQL: inline enum, unsigned integers, `_charset` check literals
pub fn mysql_shop() -> DatabaseMetadata {
    DatabaseMetadata::new(
        vec![Table::new("shop", "products")
            .column(Column::new("id", "bigint unsigned").auto_increment())
            .column(Column::new("name", "varchar(255)"))
            .column(Column::new("size", "size"))
            .column(Column::new("is_active", "tinyint").check("(`is_active` in (0,1))"))
            .column(
                Column::new("finish", "varchar(16)")
                    .nullable()
                    .check(r"(`finish` in (_utf8mb4\'matte\',_utf8mb4\'gloss\'))"),
            )
            .column(Column::new("added_on", "date"))],
        vec![Enum::new("shop", "size", ["small", "medium", "large"])],
    )
}

/// SQLite: constraints only available from the CREATE TABLE text
pub fn sqlite_todos() -> DatabaseMetadata {
    DatabaseMetadata::new(
        vec![
            Table::new("main", "todos")
                .definition(
                    "CREATE TABLE todos (\n  id INTEGER PRIMARY KEY AUTOINCREMENT,\n  title TEXT NOT NULL,\n  done INTEGER NOT NULL DEFAULT 0 CHECK (done IN (0, 1)),\n  priority TEXT CHECK (priority IN ('low', 'high')),\n  attachment BLOB,\n  extra\n)",
                )
                .column(Column::new("id", "INTEGER").auto_increment())
                .column(Column::new("title", "TEXT"))
                .column(Column::new("done", "INTEGER").with_default())
                .column(Column::new("priority", "TEXT").nullable())
                .column(Column::new("attachment", "BLOB").nullable())
                .column(Column::new("extra", "").nullable()),
            Table::new("main", "open_todos")
                .view()
                .column(Column::new("id", "INTEGER"))
                .column(Column::new("title", "TEXT")),
        ],
        vec![],
    )
}

/// SQL Server: `[col]=(n)` checks, `N'...'` literals, variant and spatial types
pub fn mssql_inventory() -> DatabaseMetadata {
    DatabaseMetadata::new(
        vec![
            Table::new("dbo", "items")
                .column(Column::new("id", "int").auto_increment())
                .column(Column::new("sku", "nvarchar(32)"))
                .column(Column::new("in_stock", "bit"))
                .column(Column::new("flag", "tinyint").check("([flag]=(0) OR [flag]=(1))"))
                .column(
                    Column::new("grade", "nvarchar(1)")
                        .check("([grade]=N'A' OR [grade]=N'B' OR [grade]=N'C')"),
                )
                .column(Column::new("props", "sql_variant").nullable())
                .column(Column::new("footprint", "geography").nullable()),
            Table::new("audit", "changes")
                .column(Column::new("id", "bigint").auto_increment())
                .column(Column::new("at", "datetime2")),
        ],
        vec![],
    )
}
