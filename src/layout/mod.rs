//! Document layout: turns input records into a [`DocumentModel`](crate::model::DocumentModel).
//!
//! All assemblers are pure functions of the input record, the
//! [`StyleConfig`], and any pre-loaded blocks (logo, extracted resume).

mod bullets;
mod highlight;
mod normalize;
mod options;
mod proposal;
mod resume;
mod tables;

pub use bullets::{bullet_paragraph, clean_bullet_line, format_bullets, BULLET_GLYPH};
pub use highlight::{Highlighter, HIGHLIGHT_KEYWORDS};
pub use normalize::{
    has_expenses, normalize_commitment, normalize_duration, normalize_duration_compact,
    normalize_rate,
};
pub use options::{load_logo, GenerateOptions, LogoAsset, StyleConfig, TableLayout};
pub use proposal::{assemble_proposal, date_range, PROPOSAL_TITLE};
pub use resume::{assemble_resume, education_line};
pub use tables::{build_combined_table, build_expense_table, build_staff_table, build_summary_grid};
