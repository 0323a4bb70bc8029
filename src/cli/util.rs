const VISIBLE_KEY_CHARS: usize = 10;

pub(crate) fn mask_api_key(key: &str) -> String {
    if key.is_empty() {
        return "(not set)".to_string();
    }

    let visible: String = key.chars().take(VISIBLE_KEY_CHARS).collect();
    format!("{visible}...")
}

pub(crate) fn section_header(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}
