/// Schema script shipped next to the program as `prompts_index.sql`
pub const BUNDLED_SCHEMA: &str = include_str!("../../assets/prompts_index.sql");

/// Table the loader replaces
pub const PROMPTS_TABLE: &str = "prompts";

/// Columns written by the loader, in insert order
pub const PROMPT_COLUMNS: [&str; 9] = [
    "id",
    "title_he",
    "category",
    "use_case",
    "prompt_he",
    "variables_json",
    "output_format",
    "quality_checks_json",
    "source_json",
];

pub const DELETE_PROMPTS: &str = "DELETE FROM prompts";

pub const INSERT_PROMPT: &str = "
INSERT INTO prompts (id, title_he, category, use_case, prompt_he, variables_json, output_format, quality_checks_json, source_json)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
";
