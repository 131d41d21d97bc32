//! Fixed branding and colors of the invoice document.

use invoicepress_types::Color;

pub const BRAND_NAME: &str = "Josh Unwin";

/// Shaded background of the project/client info box.
pub const INFO_FILL: Color = Color::rgb(0xf5, 0xf5, 0xf5);

/// Thin interior rules.
pub const RULE_LIGHT: Color = Color::rgb(0xed, 0xed, 0xed);

/// The emphasized rule above the final totals row.
pub const RULE_DARK: Color = Color::rgb(0x2b, 0x2b, 0x2b);
