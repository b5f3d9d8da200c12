/// Renders a command and its arguments as a copy-pasteable POSIX shell line.
pub fn render_command_line(command: &str, args: &[String]) -> String {
    std::iter::once(command)
        .chain(args.iter().map(String::as_str))
        .map(quote_arg)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn quote_arg(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || matches!(c, '-' | '_' | '.' | '/' | ':' | '=' | '+' | ',' | '@' | '%')
        });
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r#"'\''"#))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_arguments_are_left_alone() {
        let line = render_command_line(
            "apt-get",
            &["install".into(), "-y".into(), "ros-noetic-ros-base=1.5.0*".into()],
        );
        assert_eq!(line, "apt-get install -y 'ros-noetic-ros-base=1.5.0*'");
    }

    #[test]
    fn single_quotes_are_escaped() {
        assert_eq!(quote_arg("it's"), r#"'it'\''s'"#);
        assert_eq!(quote_arg(""), "''");
    }
}
