use std::collections::HashMap;

/// First code of the substitution block
pub const SPECIAL_BASE: u8 = 0x90;

/// Ink colours 0-7 as CSS short hex
pub const INK_COLOURS: [&str; 8] = [
    "#000", "#00f", "#f00", "#f0f", "#0f0", "#0ff", "#ff0", "#fff",
];

/// Glyphs the machine font draws by overprinting two characters
const T_CARON: &str =
    "<span style=\"position:relative\">T<span style=\"position: absolute; left: 0\">ž</span></span>";
const MK_LIGATURE: &str =
    "<span style=\"position:relative\">M<span style=\"position: relative; left: -0.4em\">K</span></span>";

/// Substitutions for codes 0x90 upward, in code order. The block reuses the
/// user-defined graphics slots for accented letters and BASIC keyword tokens.
const SPECIALS: [&str; 26] = [
    "Ž", T_CARON, "Č", "đ", "š", "č", "SI", "", "ž", "Ž", "NC", "LA", MK_LIGATURE, "IR", "ö", "ß",
    "ž", "ä", "Š", "ć", "ü", "RND", "INKEY$", "PI", "FN ", "POINT ",
];

lazy_static! {
    /// Inverted character code -> markup replacement
    pub static ref SUBSTITUTIONS: HashMap<u8, &'static str> = {
        let mut m = HashMap::new();
        m.insert(b'&', "&amp;");
        m.insert(b'<', "&lt;");
        m.insert(b'>', "&gt;");
        m.insert(0x60, "&pound;");
        m.insert(0x7f, "&copy;");
        for (i, repl) in SPECIALS.iter().enumerate() {
            m.insert(SPECIAL_BASE + i as u8, *repl);
        }
        m
    };
}

/// Look up the replacement for an inverted code, if it has one
pub fn substitution(code: u8) -> Option<&'static str> {
    SUBSTITUTIONS.get(&code).copied()
}
