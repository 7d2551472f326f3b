//! Canonical DSL rendering of a compiled script.

use combat_data::{Action, CompiledScript, RaidBlock, TurnNumber};

/// Render `script` as DSL text that compiles back to the same script.
///
/// Indices are shifted back to the 1-based numbers the DSL uses. A turn whose
/// actions cannot be written as one block (for example two merged `turn N:`
/// blocks that each select a character) is split into consecutive blocks with
/// the same number, which the compiler merges again.
pub fn render_script(script: &CompiledScript) -> String {
    let mut out = String::new();
    for (pos, (_, block)) in script.iter().enumerate() {
        if pos > 0 {
            out.push('\n');
        }
        render_raid(block, &mut out);
    }
    out
}

fn render_raid(block: &RaidBlock, out: &mut String) {
    if let Some(url) = &block.info.url {
        out.push_str(url);
        out.push('\n');
    }
    if let Some(summon) = &block.info.summon {
        out.push_str(&format!("summon:{summon}\n"));
    }
    if let Some(repeat) = block.info.repeat {
        out.push_str(&format!("repeat:{repeat}\n"));
    }
    for (turn, actions) in &block.turns {
        TurnWriter::new(*turn).render(actions, out);
    }
}

/// Replays the turn parser's selection rules while writing body lines.
struct TurnWriter {
    turn: TurnNumber,
    lines: Vec<String>,
    selected: bool,
    deselect_pending: bool,
    chain_open: bool,
}

impl TurnWriter {
    fn new(turn: TurnNumber) -> Self {
        Self {
            turn,
            lines: Vec::new(),
            selected: false,
            deselect_pending: false,
            chain_open: false,
        }
    }

    fn render(mut self, actions: &[Action], out: &mut String) {
        out.push_str(&format!("turn {}:\n", self.turn));
        for action in actions {
            self.write(action, out);
        }
        self.flush(out);
        out.push_str("end\n");
    }

    fn write(&mut self, action: &Action, out: &mut String) {
        match action {
            Action::SelectCharacter { index } => {
                if self.selected {
                    self.split(out);
                }
                self.open_chain(*index);
            },
            Action::ChangeCharacter { index } => self.open_chain(*index),
            Action::UseSkill { index } => self.extend_chain(&format!(".useskill({})", index + 1)),
            Action::Target { index } => self.extend_chain(&format!(".target({})", index + 1)),
            Action::DeselectCharacter => {
                self.deselect_pending = self.selected;
                self.chain_open = false;
            },
            Action::UseSummon { index } => {
                self.leave_selection(out);
                self.line(format!("summon{}", index + 1));
            },
            Action::EnableFullAuto => {
                self.leave_selection(out);
                self.line("enablefullauto".to_string());
            },
            Action::Attack => {
                self.line("attack".to_string());
                self.selected = false;
            },
            Action::Wait { seconds } => self.line(format!("wait({seconds})")),
            Action::Custom { raw_text } => self.line(raw_text.clone()),
        }
    }

    fn open_chain(&mut self, index: u8) {
        self.line(format!("character{}", index + 1));
        self.selected = true;
        self.chain_open = true;
    }

    fn extend_chain(&mut self, segment: &str) {
        if self.chain_open
            && let Some(last) = self.lines.last_mut()
        {
            last.push_str(segment);
            return;
        }
        self.line(segment.trim_start_matches('.').to_string());
    }

    /// Summons and full auto deselect on their own; without a recorded
    /// deselect they must start a fresh block.
    fn leave_selection(&mut self, out: &mut String) {
        if self.selected && !self.deselect_pending {
            self.split(out);
        }
        self.selected = false;
        self.deselect_pending = false;
    }

    fn line(&mut self, text: String) {
        self.lines.push(text);
        self.chain_open = false;
        self.deselect_pending = false;
    }

    fn split(&mut self, out: &mut String) {
        self.flush(out);
        out.push_str(&format!("end\nturn {}:\n", self.turn));
        self.selected = false;
        self.deselect_pending = false;
    }

    fn flush(&mut self, out: &mut String) {
        for line in self.lines.drain(..) {
            out.push_str("    ");
            out.push_str(&line);
            out.push('\n');
        }
        self.chain_open = false;
    }
}
