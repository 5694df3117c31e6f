use std::ops::Range;

/// 復原堆疊保留的最大快照數。 / Maximum number of snapshots kept on the undo stack.
pub const HISTORY_LIMIT: usize = 100;

/// 編輯中的文字緩衝，附帶選取範圍、復原歷史與內部剪貼簿。 / Editable text plus selection, undo history, and an internal clipboard.
///
/// The text widget edits [`EditBuffer::text_mut`] in place; every such
/// change must be followed by [`EditBuffer::commit`] so that it becomes an
/// undo step. Operations issued through the buffer's own methods commit
/// automatically.
#[derive(Debug, Clone, Default)]
pub struct EditBuffer {
    text: String,
    committed: String,
    selection: Option<Range<usize>>,
    undo: Vec<String>,
    redo: Vec<String>,
    clipboard: Option<String>,
}

impl EditBuffer {
    /// 建立空白緩衝。 / Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// 以既有文字建立緩衝，不含任何歷史。 / Creates a buffer holding `text` with an empty history.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            committed: text.clone(),
            text,
            ..Self::default()
        }
    }

    /// 取得目前內容。 / Returns the current contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 提供給文字元件直接編輯的可變參考。 / Mutable access for the host text widget.
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// 將尚未記錄的直接編輯轉為一個復原步驟。 / Turns pending direct edits into one undo step.
    pub fn commit(&mut self) -> bool {
        if self.text == self.committed {
            return false;
        }
        let previous = std::mem::replace(&mut self.committed, self.text.clone());
        self.push_undo(previous);
        self.redo.clear();
        self.clamp_selection();
        true
    }

    /// 以新內容整體取代，並記錄為可復原的步驟。 / Replaces the whole text as one undoable step.
    pub fn replace_text(&mut self, text: String) {
        self.commit();
        if text == self.text {
            return;
        }
        self.text = text;
        self.commit();
    }

    /// 清除內容與歷史（開新檔或載入檔案時使用）。 / Replaces the text and forgets all history.
    pub fn reset(&mut self, text: String) {
        self.committed = text.clone();
        self.text = text;
        self.selection = None;
        self.undo.clear();
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        self.text != self.committed || !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// 復原上一個步驟。 / Steps back to the previous snapshot.
    pub fn undo(&mut self) -> bool {
        self.commit();
        let Some(previous) = self.undo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.text, previous);
        self.redo.push(current);
        self.committed = self.text.clone();
        self.clamp_selection();
        true
    }

    /// 重做最近一次復原的步驟。 / Re-applies the most recently undone snapshot.
    pub fn redo(&mut self) -> bool {
        if self.text != self.committed {
            // 有新的直接編輯時重做歷史失效。 / Fresh direct edits invalidate the redo history.
            self.commit();
            return false;
        }
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.text, next);
        self.push_undo(current);
        self.committed = self.text.clone();
        self.clamp_selection();
        true
    }

    /// 以字元索引設定選取範圍；起訖相同代表游標位置。 / Sets the selection in character indices; an empty range is a caret.
    pub fn set_selection(&mut self, selection: Option<Range<usize>>) {
        self.selection = selection.map(|range| {
            if range.start <= range.end {
                range
            } else {
                range.end..range.start
            }
        });
        self.clamp_selection();
    }

    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    /// 選取全部內容。 / Selects the entire buffer.
    pub fn select_all(&mut self) {
        self.selection = Some(0..self.text.chars().count());
    }

    /// 取得選取的文字（非空時）。 / Returns the selected text when the selection is non-empty.
    pub fn selected_text(&self) -> Option<&str> {
        let range = self.byte_selection()?;
        if range.is_empty() {
            return None;
        }
        Some(&self.text[range])
    }

    /// 複製選取內容到內部剪貼簿並回傳。 / Copies the selection into the internal clipboard.
    pub fn copy(&mut self) -> Option<String> {
        let selected = self.selected_text()?.to_string();
        self.clipboard = Some(selected.clone());
        Some(selected)
    }

    /// 剪下選取內容。 / Cuts the selection, leaving the caret where it started.
    pub fn cut(&mut self) -> Option<String> {
        let selected = self.copy()?;
        let range = self.byte_selection()?;
        let caret = self.selection.as_ref().map_or(0, |sel| sel.start);
        self.commit();
        self.text.replace_range(range, "");
        self.commit();
        self.selection = Some(caret..caret);
        Some(selected)
    }

    /// 貼上文字：優先使用外部剪貼簿，否則使用內部剪貼簿。 / Pastes external clipboard text, falling back to the internal clipboard.
    pub fn paste(&mut self, external: Option<String>) -> bool {
        let Some(incoming) = external
            .filter(|text| !text.is_empty())
            .or_else(|| self.clipboard.clone())
        else {
            return false;
        };

        let end_of_text = self.text.chars().count();
        let range = self.selection.clone().unwrap_or(end_of_text..end_of_text);
        let bytes = self.char_to_byte(range.start)..self.char_to_byte(range.end);

        self.commit();
        self.text.replace_range(bytes, &incoming);
        self.commit();
        let caret = range.start + incoming.chars().count();
        self.selection = Some(caret..caret);
        true
    }

    fn push_undo(&mut self, snapshot: String) {
        self.undo.push(snapshot);
        if self.undo.len() > HISTORY_LIMIT {
            let overflow = self.undo.len() - HISTORY_LIMIT;
            self.undo.drain(..overflow);
        }
    }

    fn byte_selection(&self) -> Option<Range<usize>> {
        let range = self.selection.as_ref()?;
        Some(self.char_to_byte(range.start)..self.char_to_byte(range.end))
    }

    fn char_to_byte(&self, index: usize) -> usize {
        self.text
            .char_indices()
            .nth(index)
            .map_or(self.text.len(), |(byte, _)| byte)
    }

    fn clamp_selection(&mut self) {
        let len = self.text.chars().count();
        if let Some(range) = &mut self.selection {
            range.end = range.end.min(len);
            range.start = range.start.min(range.end);
        }
    }
}
