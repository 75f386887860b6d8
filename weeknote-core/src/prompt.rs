//! Report prompt assembly.
//!
//! The prompt is a fixed instruction header followed by one section per
//! weekly note, in the order given. Callers are expected to pass notes
//! already sorted by creation time and already checked against the token
//! budget; nothing here truncates.

use std::fmt::Write;

use crate::types::NoteContent;

/// Instruction header: the five report sections and how two of them are
/// evaluated.
pub const REPORT_HEADER: &str = "你是一位專業的績效報告撰寫助理。請根據以下週報內容，生成一份完整的年度工作績效報告。

報告必須包含以下章節（使用 Markdown 格式）：

# 一、年度重點成就摘要
[簡述本年度最重要的工作成果]

# 二、技術運用
說明：開發之技術或系統，實際應用於 BG/BU/外部客戶
評估原則：開發何種技術/系統/功能用於哪一專案
[請列舉具體的技術應用案例]

# 三、技術研發
說明：研發新技術
評估原則：研發何種技術/功能於院長會議中報告討論，或申請專利論文
[請列舉研發性質的工作內容]

# 四、遇到的挑戰和解決方案
[描述主要挑戰及對應的解決方法]

# 五、量化指標
- 完成專案數：[X] 個
- 解決問題數：[Y] 個
- 其他相關數據

---

以下是按時間順序排列的週報內容：
";

/// Build the report prompt from chronologically ordered notes.
///
/// Deterministic: the same slice always produces the same string. Dates
/// are rendered in UTC.
#[must_use]
pub fn build_prompt(notes: &[NoteContent]) -> String {
    let body_len: usize = notes.iter().map(|n| n.content.len() + n.title.len() + 64).sum();
    let mut prompt = String::with_capacity(REPORT_HEADER.len() + body_len);
    prompt.push_str(REPORT_HEADER);

    for (i, note) in notes.iter().enumerate() {
        let date = note
            .created_date()
            .map_or_else(|| "unknown".to_string(), |d| d.format("%Y-%m-%d").to_string());
        // Writing to a String cannot fail.
        let _ = write!(
            prompt,
            "\n## 週報 {} (創建日期: {date})\n{}\n\n## 內容\n{}\n",
            i + 1,
            note.display_title(),
            note.content,
        );
    }

    prompt
}
