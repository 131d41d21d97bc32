//! The position-dependent horizontal rule policy of the line-items table.

use crate::palette::{RULE_DARK, RULE_LIGHT};
use invoicepress_style::Border;

/// The horizontal rule drawn above row `row_index` in a table of
/// `total_rows` rows.
///
/// A pure function of the table's shape, evaluated once per row during tree
/// construction: interior boundaries get a thin light rule, the boundary
/// directly above the last row gets the thick dark emphasis, and the outer
/// edges get none. Changing the row count changes which boundary is
/// emphasized, so this must be re-evaluated whenever rows are added.
pub fn rule_above(row_index: usize, total_rows: usize) -> Option<Border> {
    if row_index == 0 || row_index >= total_rows {
        return None;
    }
    if row_index == total_rows - 1 {
        Some(Border::solid(3.0, RULE_DARK))
    } else {
        Some(Border::solid(1.0, RULE_LIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outer_edges_have_no_rule() {
        assert!(rule_above(0, 6).is_none());
        assert!(rule_above(6, 6).is_none());
        assert!(rule_above(7, 6).is_none());
    }

    #[test]
    fn only_the_boundary_above_the_last_row_is_thick() {
        for total_rows in 2..10 {
            for row_index in 1..total_rows {
                let rule = rule_above(row_index, total_rows).unwrap();
                if row_index == total_rows - 1 {
                    assert_eq!(rule.width, 3.0);
                    assert_eq!(rule.color, RULE_DARK);
                } else {
                    assert_eq!(rule.width, 1.0);
                    assert_eq!(rule.color, RULE_LIGHT);
                }
            }
        }
    }

    #[test]
    fn degenerate_tables_draw_nothing() {
        assert!(rule_above(0, 0).is_none());
        assert!(rule_above(0, 1).is_none());
        assert!(rule_above(1, 1).is_none());
    }
}
