use crate::tools::ToolReport;
use rand::seq::SliceRandom;
use rand::Rng;

pub const REPLY_HEADER: &str = "Based on your request, I've used the following tools:\n\n";

const ALL_FAILED_CONCLUSION: &str =
    "I encountered some issues with the tools, but I'm ready to try again with a different approach.";
const HELPFUL_CONCLUSION: &str =
    "I hope this information helps! Feel free to ask follow-up questions or request additional analysis.";

const SIMPLE_RESPONSES: [&str; 3] = [
    "I understand your question. Could you be more specific about what kind of information or action you need?",
    "That's an interesting question! To provide the best help, could you clarify what you'd like me to search for, calculate, or analyze?",
    "I'm here to help! I can search the web, perform calculations, execute code, call APIs, or analyze data. What would you like me to do?",
];

/// One tool's contribution to the reply
#[derive(Debug, Clone, Copy)]
pub struct ReplySection<'a> {
    pub display_name: &'a str,
    pub report: &'a ToolReport,
    /// Recovery hint rendered under a failed tool
    pub suggestion: Option<&'a str>,
}

/// Markdown reply for a turn that ran tools
pub fn synthesize_response(sections: &[ReplySection<'_>]) -> String {
    let mut response = String::from(REPLY_HEADER);

    for section in sections {
        match &section.report.error {
            Some(error) => {
                response.push_str(&format!("❌ **{}**: {}\n\n", section.display_name, error));
                if let Some(suggestion) = section.suggestion {
                    response.push_str(&format!("💡 {}\n\n", suggestion));
                }
            }
            None => {
                response.push_str(&format!(
                    "✅ **{}**: {}\n\n",
                    section.display_name,
                    section
                        .report
                        .summary
                        .as_deref()
                        .unwrap_or("Completed successfully")
                ));
                if let Some(data) = section.report.data.as_deref().filter(|d| !d.is_empty()) {
                    response.push_str(data);
                    response.push_str("\n\n");
                }
            }
        }
    }

    response.push_str("---\n\n");
    response.push_str(generate_conclusion(sections));
    response
}

pub fn generate_conclusion(sections: &[ReplySection<'_>]) -> &'static str {
    if sections.iter().all(|s| s.report.is_error()) {
        ALL_FAILED_CONCLUSION
    } else {
        HELPFUL_CONCLUSION
    }
}

/// Reply for a message that matched no tool
pub fn simple_response<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    SIMPLE_RESPONSES
        .choose(rng)
        .copied()
        .unwrap_or(SIMPLE_RESPONSES[0])
}

pub fn is_simple_response(text: &str) -> bool {
    SIMPLE_RESPONSES.contains(&text)
}
