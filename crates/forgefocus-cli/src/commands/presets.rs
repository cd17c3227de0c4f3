use forgefocus_core::timer::{presets, SessionConfig};
use forgefocus_core::Config;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let all = presets();
    if json {
        println!("{}", serde_json::to_string_pretty(&all)?);
        return Ok(());
    }
    for (index, preset) in all.iter().enumerate() {
        let marker = if index == config.timer.default_preset { "*" } else { " " };
        println!("{marker} {index}  {}", preset_line(preset));
    }
    Ok(())
}

fn preset_line(preset: &SessionConfig) -> String {
    format!(
        "{:>2}m / {}m  {:<12} {} XP",
        preset.focus_minutes, preset.rest_minutes, preset.label, preset.points
    )
}
