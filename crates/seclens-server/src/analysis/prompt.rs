// crates/seclens-server/src/analysis/prompt.rs
// Fixed prompt template for security analysis

use crate::llm::Message;

/// System instruction sent with every analysis
pub const SYSTEM_PROMPT: &str = "You are a security expert and code fixer.";

/// Build the user instruction with the submitted code embedded verbatim
/// inside a fenced block.
pub fn user_prompt(code: &str) -> String {
    format!(
        r#"You are a senior security engineer specializing in secure coding practices.

Analyze the following code for actual or potential security vulnerabilities.

Return your response in **valid JSON** format with exactly two keys:
1. "vulnerabilities": an array of clear, concise descriptions of any identified issues. If there are no issues, return an empty array.
2. "fixedCode": the same code if no vulnerabilities are found, OR an improved version of the code with security best practices applied if changes are needed. Do NOT add extra code unless it's directly related to fixing a real issue.

Respond with the JSON object only.

Code:
```
{code}
```"#
    )
}

/// System + user messages for one analysis
pub fn messages(code: &str) -> Vec<Message> {
    vec![Message::system(SYSTEM_PROMPT), Message::user(user_prompt(code))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_embeds_code_verbatim() {
        let code = "query = \"SELECT * FROM t WHERE id=\" + id\n  indented();";
        let prompt = user_prompt(code);
        assert!(prompt.contains(&format!("```\n{}\n```", code)));
    }

    #[test]
    fn test_user_prompt_names_both_keys() {
        let prompt = user_prompt("x");
        assert!(prompt.contains("\"vulnerabilities\""));
        assert!(prompt.contains("\"fixedCode\""));
    }

    #[test]
    fn test_user_prompt_is_deterministic() {
        assert_eq!(user_prompt("abc"), user_prompt("abc"));
    }

    #[test]
    fn test_messages_order() {
        let msgs = messages("code");
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].role, "system");
        assert_eq!(msgs[0].content, SYSTEM_PROMPT);
        assert_eq!(msgs[1].role, "user");
    }

    #[test]
    fn test_empty_code_still_builds_prompt() {
        let prompt = user_prompt("");
        assert!(prompt.ends_with("```\n\n```"));
    }
}
