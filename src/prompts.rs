use crate::models::{CreatePreset, EditPreset, Preset};

pub const STICKER: &str = "Sticker style, die-cut, white border around, flat illustration: {{prompt}}";
pub const LOGO: &str = "Modern minimalist vector logo, clean lines, high contrast: {{prompt}}";
pub const COMIC: &str = "Comic book art style, vibrant colors, bold outlines: {{prompt}}";
pub const ADD_REMOVE: &str = "Add or modify elements according to: {{prompt}}";
pub const RETOUCH: &str = "Professionally retouch and enhance details: {{prompt}}";
pub const STYLE: &str = "Apply a unique artistic style while preserving the structure: {{prompt}}";
pub const COMPOSE: &str = "Merge and blend these two images naturally into one scene: {{prompt}}";

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Template applied to the user's prompt for a preset, `None` when the prompt
/// is sent as typed.
pub fn template_for(preset: Preset) -> Option<&'static str> {
    match preset {
        Preset::Create(CreatePreset::Free) => None,
        Preset::Create(CreatePreset::Sticker) => Some(STICKER),
        Preset::Create(CreatePreset::Logo) => Some(LOGO),
        Preset::Create(CreatePreset::Comic) => Some(COMIC),
        Preset::Edit(EditPreset::AddRemove) => Some(ADD_REMOVE),
        Preset::Edit(EditPreset::Retouch) => Some(RETOUCH),
        Preset::Edit(EditPreset::Style) => Some(STYLE),
        Preset::Edit(EditPreset::Compose) => Some(COMPOSE),
    }
}

/// Final prompt text sent to the image model.
pub fn frame(preset: Preset, prompt: &str) -> String {
    match template_for(preset) {
        Some(template) => render(template, &[("prompt", prompt)]),
        None => prompt.to_string(),
    }
}
