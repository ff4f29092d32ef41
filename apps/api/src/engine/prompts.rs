//! Prompt construction for the LLM engine. The per-test persona travels as
//! the system instruction; everything else is a single user prompt.

use chrono::{Datelike, Timelike};

use super::AnalysisContext;

/// Instruction pinning the reply to the four-key schema the UI consumes.
pub const RESPONSE_FORMAT_INSTRUCTION: &str = r#"Return the response in strictly valid JSON format with the following keys:
{
  "summary": "One sentence summary",
  "personality": "Refined personality analysis based on Saju (detailed)",
  "future_partner": "Detailed partner analysis",
  "advice": "Practical advice"
}"#;

/// Builds the user prompt embedding the computed pillars and birth data.
pub fn build_user_prompt(ctx: &AnalysisContext) -> String {
    let birth = ctx.solar_birth;
    format!(
        "User Info:\n\
         - Gender: {gender}\n\
         - Birth Date (Solar): {y}-{m}-{d} {h}:{min:02}\n\
         - Original Calendar: {calendar}\n\
         \n\
         Saju Pillars (Four Pillars):\n\
         - Year: {year}\n\
         - Month: {month}\n\
         - Day: {day}\n\
         - Hour: {hour}\n\
         - Day Master: {day_master} ({day_master_korean}, {polarity} {element})\n\
         \n\
         Please analyze this user's fortune based on the Four Pillars above \
         and your system instructions.\n\
         \n\
         {format_instruction}\n",
        gender = ctx.gender.as_str(),
        y = birth.year(),
        m = birth.month(),
        d = birth.day(),
        h = birth.hour(),
        min = birth.minute(),
        calendar = ctx.calendar_type.as_str(),
        year = ctx.pillars.year,
        month = ctx.pillars.month,
        day = ctx.pillars.day,
        hour = ctx.pillars.hour,
        day_master = ctx.pillars.day_master(),
        day_master_korean = ctx.pillars.day_master().korean(),
        polarity = if ctx.pillars.day_master().is_yang() { "yang" } else { "yin" },
        element = ctx.pillars.day_master().element().as_str(),
        format_instruction = RESPONSE_FORMAT_INSTRUCTION,
    )
}
