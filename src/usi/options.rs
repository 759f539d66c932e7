//! Formats [`crate::options::OPTIONS`] for the `usi` command's
//! `option name ... type ...` lines, matching the source engine's
//! `ostream& operator<<(ostream&, const Option&)` formatting exactly:
//! `type T default V`, plus `min`/`max` for a spin or `var` per choice for
//! a combo.

use crate::options::{OptionValue, OPTIONS};

pub fn print_options() {
    let options = OPTIONS.read();
    for slot in options.iter() {
        let rendered = match &slot.value {
            OptionValue::Combo { value, choices } => {
                let mut s = format!("type combo default {value}");
                for choice in choices {
                    s.push_str(" var ");
                    s.push_str(choice);
                }
                s
            }
            OptionValue::Spin { value, min, max } => {
                format!("type spin default {value} min {min} max {max}")
            }
            OptionValue::Check { value } => {
                format!("type check default {}", if *value { "true" } else { "false" })
            }
        };
        println!("option name {} {}", slot.name, rendered);
    }
}
