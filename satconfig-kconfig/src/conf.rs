//! Reading and writing `key=value` configuration files.
//!
//! Mirrors the two entry points `satconf.c`'s `main` calls before handing control to the
//! constraint compiler: `conf_read_simple(NULL, S_DEF_USER)` to load whatever `.config`
//! already exists, and `conf_read_simple(".satconfig", S_DEF_SAT)` to load a second,
//! higher-priority overlay of assumptions. Each symbol keeps both overlays separately
//! (`Symbol::def`) rather than collapsing them into one `curr` value as they're read, so
//! the constraint compiler can see both and decide which one wins per `spec.md` §4.4's
//! default-cascading rule.

use std::fs;
use std::io::Write as _;
use std::path::Path;

use crate::error::ConfError;
use crate::symbol::{Kind, Tri, Value};
use crate::table::SymbolTable;

/// Which overlay slot a `conf_read_simple` call fills in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefSlot {
    User = 0,
    Sat = 1,
}

const CONFIG_PREFIX: &str = "CONFIG_";

/// Reads a `key=value` configuration file into the `slot` overlay of each symbol it
/// names. Unknown symbol names are skipped rather than rejected: `satconf.c` treats a
/// stale `.config` entry the same way, since symbols routinely disappear between kernel
/// versions.
pub fn conf_read_simple(table: &mut SymbolTable, path: &Path, slot: DefSlot) -> Result<(), ConfError> {
    let Ok(contents) = fs::read_to_string(path) else {
        log::debug!("{}: no such file, leaving slot {slot:?} untouched", path.display());
        return Ok(());
    };
    log::debug!("{}: overlaying into slot {slot:?}", path.display());

    let file_name: std::rc::Rc<str> = std::rc::Rc::from(path.to_string_lossy().as_ref());

    for (line_index, raw_line) in contents.lines().enumerate() {
        let line_number = (line_index + 1) as u32;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix('#') {
            let rest = rest.trim();
            if let Some(name) = rest
                .strip_prefix(CONFIG_PREFIX)
                .and_then(|s| s.strip_suffix("is not set"))
                .map(|s| s.trim())
            {
                if let Some(id) = table.find(name) {
                    let symbol = table.get_mut(id);
                    symbol.def[slot as usize] = Value::Tristate(Tri::No);
                    mark_def_slot(symbol, slot);
                }
            }
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfError::Parse(crate::error::ParseError::new(
                crate::symbol::Span::new(file_name.clone(), line_number),
                format!("malformed configuration line '{line}'"),
            )));
        };

        let Some(name) = key.strip_prefix(CONFIG_PREFIX) else {
            continue;
        };

        let Some(id) = table.find(name) else {
            continue;
        };

        let kind = table.get(id).kind;
        let parsed = parse_value(kind, value);
        let symbol = table.get_mut(id);
        symbol.def[slot as usize] = parsed;
        mark_def_slot(symbol, slot);
    }

    Ok(())
}

/// Records that `slot` was actually overlaid for `symbol`, so the constraint compiler
/// can tell "the user set this to n" apart from "the user never mentioned this" —
/// both parse to `Value::Tristate(Tri::No)` but only the former should drive an
/// assumption (`spec.md` §4.7).
fn mark_def_slot(symbol: &mut crate::symbol::Symbol, slot: DefSlot) {
    match slot {
        DefSlot::User => symbol.flags.def_user = true,
        DefSlot::Sat => symbol.flags.def_sat = true,
    }
}

fn parse_value(kind: Kind, raw: &str) -> Value {
    match kind {
        Kind::Bool | Kind::Tristate => match raw {
            "y" => Value::Tristate(Tri::Yes),
            "m" => Value::Tristate(Tri::Mod),
            _ => Value::Tristate(Tri::No),
        },
        Kind::String => {
            let unquoted = raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')).unwrap_or(raw);
            Value::Str(unescape(unquoted))
        }
        Kind::Int | Kind::Hex | Kind::Unknown => Value::Str(raw.to_string()),
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Writes the current value of every solvable (and int/hex/string-valued) symbol to
/// `path` in `key=value` form, the same format [conf_read_simple] reads back.
pub fn conf_write(table: &SymbolTable, path: &Path) -> Result<(), ConfError> {
    let mut out = String::new();
    out.push_str("#\n# Automatically generated configuration\n#\n");

    for symbol in table.iter() {
        let Some(name) = &symbol.name else { continue };
        match (symbol.kind, &symbol.curr) {
            (Kind::Bool | Kind::Tristate, Value::Tristate(Tri::Yes)) => {
                out.push_str(&format!("{CONFIG_PREFIX}{name}=y\n"));
            }
            (Kind::Bool | Kind::Tristate, Value::Tristate(Tri::Mod)) => {
                out.push_str(&format!("{CONFIG_PREFIX}{name}=m\n"));
            }
            (Kind::Bool | Kind::Tristate, _) => {
                out.push_str(&format!("# {CONFIG_PREFIX}{name} is not set\n"));
            }
            (Kind::String, Value::Str(value)) => {
                out.push_str(&format!("{CONFIG_PREFIX}{name}=\"{value}\"\n"));
            }
            (Kind::Int | Kind::Hex, Value::Str(value)) => {
                out.push_str(&format!("{CONFIG_PREFIX}{name}={value}\n"));
            }
            _ => {}
        }
    }

    let mut file = fs::File::create(path)?;
    file.write_all(out.as_bytes())?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// Writes the `#define`-based autoconf header a build system includes, matching
/// `conf_write_autoconf`'s format in the original kconfig tooling.
pub fn conf_write_autoconf(table: &SymbolTable, path: &Path) -> Result<(), ConfError> {
    let mut out = String::new();
    out.push_str("/*\n * Automatically generated C config: don't edit\n */\n");

    for symbol in table.iter() {
        let Some(name) = &symbol.name else { continue };
        match (symbol.kind, &symbol.curr) {
            (Kind::Bool | Kind::Tristate, Value::Tristate(Tri::Yes)) => {
                out.push_str(&format!("#define {CONFIG_PREFIX}{name} 1\n"));
            }
            (Kind::Bool | Kind::Tristate, Value::Tristate(Tri::Mod)) => {
                out.push_str(&format!("#define {CONFIG_PREFIX}{name}_MODULE 1\n"));
            }
            (Kind::String, Value::Str(value)) => {
                out.push_str(&format!("#define {CONFIG_PREFIX}{name} \"{value}\"\n"));
            }
            (Kind::Int | Kind::Hex, Value::Str(value)) => {
                out.push_str(&format!("#define {CONFIG_PREFIX}{name} {value}\n"));
            }
            _ => {}
        }
    }

    let mut file = fs::File::create(path)?;
    file.write_all(out.as_bytes())?;
    log::info!("wrote {}", path.display());
    Ok(())
}
