//! Builds a [`Config`] from UCI text.
//!
//! The parser only drives the tree construction API: unnamed `config` blocks
//! are appended, named ones are merged so that a repeated name re-opens the
//! earlier section of the same type. A repeated `option` replaces the previous value while
//! `list` entries accumulate without duplicates.

mod lexer;


use crate::error::{Result, UciError};
use crate::tree::{Config, OptionType, Section, UciOption};

/// Parse UCI text into a config named `name`.
///
/// The returned config is not tainted.
pub fn parse(name: &str, text: &str) -> Result<Config> {
    let mut config = Config::new(name);
    let mut current = None::<usize>;

    for (i, line) in text.lines().enumerate() {
        let fail = |message: String| UciError::Parse {
            config: name.to_string(),
            line: i + 1,
            message,
        };

        let words = lexer::tokenize(line).map_err(|e| fail(e.to_string()))?;
        let Some((keyword, args)) = words.split_first() else {
            continue;
        };

        match keyword.as_str() {
            "package" => {
                if args.len() != 1 {
                    return Err(fail("'package' expects exactly one name".to_string()));
                }
            }
            "config" => {
                let (section_type, section_name) = match args {
                    [section_type] => (section_type, ""),
                    [section_type, section_name] => (section_type, section_name.as_str()),
                    _ => {
                        return Err(fail(
                            "'config' expects a type and an optional name".to_string(),
                        ));
                    }
                };
                if section_type.is_empty() {
                    return Err(fail("section type cannot be empty".to_string()));
                }
                let at = open_section(&mut config, section_type, section_name).map_err(&fail)?;
                current = Some(at);
            }
            other => {
                let Some(option_type) = OptionType::from_str(other) else {
                    return Err(fail(format!("unknown keyword '{other}'")));
                };
                let [option_name, value] = args else {
                    return Err(fail(format!("'{other}' expects a name and a value")));
                };
                let Some(at) = current else {
                    return Err(fail(format!("'{other}' outside of a config section")));
                };
                if option_name.is_empty() {
                    return Err(fail("option name cannot be empty".to_string()));
                }

                let section = &mut config.sections[at];
                match option_type {
                    OptionType::Option => {
                        section.set(option_name, OptionType::Option, [value.as_str()]);
                    }
                    OptionType::List => {
                        // A list line turns an earlier scalar of the same name into a list.
                        if let Some(existing) = section.get_mut(option_name) {
                            existing.option_type = OptionType::List;
                        }
                        section.merge(UciOption::new(
                            option_name.as_str(),
                            OptionType::List,
                            [value.as_str()],
                        ));
                    }
                }
            }
        }
    }

    tracing::debug!(config = name, sections = config.sections.len(), "parsed config");
    config.mark_clean();
    Ok(config)
}

/// Start a section block and return its index in `config`.
///
/// A name that is already taken re-opens that section, provided the type
/// matches.
fn open_section(
    config: &mut Config,
    section_type: &str,
    section_name: &str,
) -> std::result::Result<usize, String> {
    let section = Section::new(section_type, section_name);
    if section.is_unnamed() {
        config.add(section);
        return Ok(config.sections.len() - 1);
    }

    if let Some(existing) = config.get_named(section_name)
        && existing.section_type != section_type
    {
        return Err(format!(
            "section '{section_name}' redefined with type '{section_type}', \
             previously '{}'",
            existing.section_type
        ));
    }
    Ok(config.merge_index(section, 0))
}
