//! Grading prompt assembly
//!
//! The judging rules live entirely in the system message. Request fields are
//! interpolated verbatim: they only ever appear inside prose sent to the
//! model, never in anything that is parsed.

use crate::schemas::deepseek::ChatMessage;
use crate::schemas::CheckPhysicsRequest;

/// Build the grading rubric for the given card
pub fn system_prompt(card: &str) -> String {
    format!(
        r#"
你是一位嚴格的物理詩詞裁判。
【評判三大鐵律 (適中標準)】
請依序檢查以下三點。違反第 1 或第 2 點直接判定不通過；第 3 點採取「邏輯關聯」判定：

1. **關聯性檢查 (Relevance) - [嚴格]**：
- 檢查玩家的解釋內容是否真的在描述「{card}」的物理機制。
- 若卡片是 A，解釋卻在講 B，視為失敗。

2. **完整性檢查 (Completeness) - [嚴格]**：
- 解釋必須是完整的句子，且長度適中。
- 若字數少於 8 個字，或只是破碎的關鍵字堆砌，視為失敗。
- 評語請加上：「請使用完整語句說明，避免過短」。

3. **情境結合 (Context Connection) - [適中標準]**：
- **判定核心**：解釋不能只背誦物理定義，必須建立「物理原理」與「詩句元素」的**因果或邏輯關聯**。
- **通過標準 (Pass)**：
    即使沒有完整描述整首詩的情境故事，只要學生能明確指出物理原理**作用在詩中的哪個具體物體或現象上**，即可通過。
    - *通過範例*：「水面像鏡子一樣反射了光線」（有指出物理原理如何作用於元素）。
- **失敗標準 (Fail)**：
    若解釋僅是物理定義，結尾隨便加上一個詩句名詞，卻**未解釋兩者關係**，視為失敗。
    - *失敗範例*：「反射就是光遇到障礙物彈回。例如水。」（這只是關鍵字拼湊，沒有邏輯連結，判定不通過）。
- 評語建議：若不通過，請提示：「請說明物理原理是如何作用在詩句中的物體上」。

【輸出格式】
請只回傳純 JSON 格式，不要有 Markdown 標記，不要有 ```json 開頭：
{{
    "pass": boolean,
    "score": integer (0-100),
    "comment": "針對上述三大鐵律的具體評語 (繁體中文)"
}}
"#
    )
}

/// Build the per-request user message
pub fn user_prompt(request: &CheckPhysicsRequest) -> String {
    format!(
        "\n詩句：{}\n物理卡牌：{}\n玩家解釋：{}\n",
        request.poem_text, request.card, request.reasoning
    )
}

/// System instruction followed by the user message
pub fn build_messages(request: &CheckPhysicsRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt(&request.card)),
        ChatMessage::user(user_prompt(request)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::deepseek::ChatRole;

    fn sample_request() -> CheckPhysicsRequest {
        CheckPhysicsRequest {
            poem_text: "池塘倒影\"月\"{}".to_string(),
            card: "光的反射".to_string(),
            reasoning: "水面像鏡子一樣<b>反射</b>了月光 ${x}".to_string(),
        }
    }

    #[test]
    fn test_system_prompt_names_card() {
        let prompt = system_prompt("折射");
        assert!(prompt.contains("「折射」的物理機制"));
        assert!(prompt.contains("\"pass\": boolean"));
    }

    #[test]
    fn test_user_prompt_is_verbatim() {
        let request = sample_request();
        let prompt = user_prompt(&request);
        assert!(prompt.contains("詩句：池塘倒影\"月\"{}"));
        assert!(prompt.contains("物理卡牌：光的反射"));
        assert!(prompt.contains("玩家解釋：水面像鏡子一樣<b>反射</b>了月光 ${x}"));
    }

    #[test]
    fn test_build_messages_has_system_then_user() {
        let messages = build_messages(&sample_request());
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[1].role, ChatRole::User);
        assert!(messages[0].content.contains("光的反射"));
    }
}
