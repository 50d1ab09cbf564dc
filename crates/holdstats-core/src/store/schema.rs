pub const DDL: &str = r#"
CREATE TABLE IF NOT EXISTS holder_scores (
  address TEXT PRIMARY KEY,
  score REAL NOT NULL,
  updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_holder_scores_updated_at ON holder_scores(updated_at);
"#;
