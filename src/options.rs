//! USI option storage.
//!
//! Exactly five options exist, in registration order — there is no `Hash`
//! option; the transposition table size is a compile-time constant (see
//! [`crate::constants::DEFAULT_TT_SIZE`]), matching the source engine.

use parking_lot::RwLock;

use once_cell::sync::Lazy;

/// One USI option's current value and the shape it was registered with.
#[derive(Clone, Debug)]
pub enum OptionValue {
    Combo { value: String, choices: Vec<&'static str> },
    Spin { value: i32, min: i32, max: i32 },
    Check { value: bool },
}

/// A single named option, in the order it should be printed during `usi`.
pub struct OptionSlot {
    pub name: &'static str,
    pub value: OptionValue,
}

fn default_options() -> Vec<OptionSlot> {
    vec![
        OptionSlot {
            name: "Eval",
            value: OptionValue::Combo {
                value: "Default".to_string(),
                choices: vec!["Default", "Random(NoSearch)"],
            },
        },
        OptionSlot {
            name: "Ordering",
            value: OptionValue::Combo {
                value: "Default".to_string(),
                choices: vec!["Default", "Random"],
            },
        },
        OptionSlot {
            name: "TimeMargin",
            value: OptionValue::Spin {
                value: 100,
                min: 0,
                max: 3000,
            },
        },
        OptionSlot {
            name: "SaveTime",
            value: OptionValue::Check { value: true },
        },
        OptionSlot {
            name: "Mate",
            value: OptionValue::Combo {
                value: "Default".to_string(),
                choices: vec!["Default", "Learn", "Average"],
            },
        },
    ]
}

pub static OPTIONS: Lazy<RwLock<Vec<OptionSlot>>> = Lazy::new(|| RwLock::new(default_options()));

/// Sets a known option by name to `value` (the raw remainder of the
/// `setoption ... value ...` line). Unknown option names are silently
/// ignored, matching the source engine's `options.count(name) > 0` guard.
pub fn set(name: &str, value: &str) {
    let mut options = OPTIONS.write();
    for slot in options.iter_mut() {
        if slot.name != name {
            continue;
        }
        match &mut slot.value {
            OptionValue::Combo { value: v, .. } => *v = value.to_string(),
            OptionValue::Spin { value: v, min, max } => {
                if let Ok(parsed) = value.parse::<i32>() {
                    *v = parsed.clamp(*min, *max);
                }
            }
            OptionValue::Check { value: v } => {
                *v = value.eq_ignore_ascii_case("true");
            }
        }
        return;
    }
}

fn combo_value(name: &str) -> String {
    let options = OPTIONS.read();
    for slot in options.iter() {
        if slot.name == name {
            if let OptionValue::Combo { value, .. } = &slot.value {
                return value.clone();
            }
        }
    }
    String::new()
}

pub fn eval_is_random_no_search() -> bool {
    combo_value("Eval") == "Random(NoSearch)"
}

pub fn ordering_is_random() -> bool {
    combo_value("Ordering") == "Random"
}

pub fn mate_mode() -> String {
    combo_value("Mate")
}

pub fn time_margin_ms() -> i64 {
    let options = OPTIONS.read();
    for slot in options.iter() {
        if slot.name == "TimeMargin" {
            if let OptionValue::Spin { value, .. } = slot.value {
                return value as i64;
            }
        }
    }
    100
}

pub fn save_time_enabled() -> bool {
    let options = OPTIONS.read();
    for slot in options.iter() {
        if slot.name == "SaveTime" {
            if let OptionValue::Check { value } = slot.value {
                return value;
            }
        }
    }
    true
}
