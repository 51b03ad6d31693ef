use super::models::Digest;

/// Render the digest into the single text block posted to the webhook:
/// a dated header, then one section per category with a bolded name and
/// a bullet line per headline.
pub fn render(digest: &Digest, label: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "**{} — {}**\n",
        label,
        digest.generated_at.format("%A, %d %B %Y")
    ));

    for section in &digest.sections {
        out.push('\n');
        out.push_str(&format!("**{}**\n", section.category));
        for headline in &section.headlines {
            match &headline.summary {
                Some(summary) => {
                    out.push_str(&format!("• {} — {}\n", headline.title, summary))
                }
                None => out.push_str(&format!("• {}\n", headline.title)),
            }
        }
    }

    out
}
