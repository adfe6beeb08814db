use super::patterns::is_two_word_name;
use super::ExtractionContext;
use crate::extraction::{full_text, PageContent};
use crate::model::{Candidate, HeuristicKind};

/// Last resort: the first "Firstname Lastname" line among the opening lines
/// of the document.
pub fn find(pages: &[PageContent], ctx: &ExtractionContext<'_>) -> Option<Candidate> {
    full_text(pages)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(ctx.config.top_lines)
        .filter(|l| is_two_word_name(l))
        .find_map(|l| ctx.accept(l, HeuristicKind::TopLines))
}
