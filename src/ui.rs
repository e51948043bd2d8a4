//! Shared terminal symbols for command output.

use console::Emoji;

pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[WARN]");
pub static VISIBLE: Emoji<'_, '_> = Emoji("✓", "+");
pub static HIDDEN: Emoji<'_, '_> = Emoji("✗", "-");
