use contract_core::{Banner, BannerKind, FieldStyle, FieldView, FormViewModel};

/// Terminal rendering of the form: header, inputs, button and banner.
pub fn render(view: &FormViewModel) -> Vec<String> {
    let mut lines = Vec::with_capacity(view.fields.len() + 5);
    lines.push(format!(
        "Date: {}    Contract Reference: {}",
        placeholder(&view.date_label),
        placeholder(&view.reference)
    ));
    lines.extend(view.fields.iter().map(format_field));

    let button = if view.submit.enabled {
        format!("[ {} ]", view.submit.label)
    } else {
        format!("[ {} ] (disabled)", view.submit.label)
    };
    lines.push(button);

    if let Some(banner) = &view.banner {
        lines.push(banner_line(banner));
    }
    lines
}

/// The banner on its own, for bringing it into view after the form scrolls.
pub fn banner_line(banner: &Banner) -> String {
    let tag = match banner.kind {
        BannerKind::Success => "SUCCESS",
        BannerKind::Error => "ERROR",
    };
    format!(">> {tag}: {}", banner.message)
}

fn format_field(field: &FieldView) -> String {
    let marker = if field.required { "*" } else { " " };
    let style = match field.style {
        FieldStyle::Active => "active",
        FieldStyle::Filled => "filled",
    };
    format!(
        "{label:>15}{marker} {value:<32} ({style}, bg {bg})",
        label = field.label,
        value = field.value,
        bg = field.style.background()
    )
}

fn placeholder(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
