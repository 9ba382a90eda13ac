use anyhow::Result;
use serde::Serialize;

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn render_json_lines<T: Serialize>(items: &[T]) -> Result<String> {
    let mut out = String::new();
    for item in items {
        out.push_str(&serde_json::to_string(item)?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use crate::output::json::render_json_lines;
    use crate::types::{Program, ProgramKind};

    #[test]
    fn wallet_lines_use_type_key() {
        let rendered =
            render_json_lines(&[Program::new("World of Hyatt", ProgramKind::Hotel, 42_000)])
                .expect("json");
        assert_eq!(
            rendered,
            "{\"name\":\"World of Hyatt\",\"type\":\"hotel\",\"balance\":42000}\n"
        );
    }
}
