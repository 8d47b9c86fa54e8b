use std::io::Write;

use crate::builder::{ContainerTree, RowNode, SlotNode};
use crate::error::Result;
use crate::registry::CardRegistry;
use crate::width::{display_width, truncate_to_width};

/// Renderer parameters.
#[derive(Debug, Clone)]
pub struct RendererSettings {
    /// Total line width in columns.
    pub width: u16,
    pub handle_glyph: char,
    pub dash_glyph: char,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            width: 48,
            handle_glyph: '≡',
            dash_glyph: '-',
        }
    }
}

/// Draws one line per dashboard row: `[title]` for cards and bracketed
/// blanks for placeholders (dashed in edit mode).
pub struct TextRenderer {
    settings: RendererSettings,
}

impl TextRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        Self { settings }
    }

    pub fn with_default() -> Self {
        Self::new(RendererSettings::default())
    }

    pub fn settings_mut(&mut self) -> &mut RendererSettings {
        &mut self.settings
    }

    pub fn render(
        &self,
        writer: &mut impl Write,
        tree: &ContainerTree,
        registry: &CardRegistry,
    ) -> Result<()> {
        let width = usize::from(self.settings.width);
        for row in &tree.rows {
            let line = match row {
                RowNode::Full(slot) => self.cell(slot, registry, width),
                RowNode::Split { left, right } => {
                    let half = width.saturating_sub(1) / 2;
                    let rest = width.saturating_sub(half + 1);
                    format!(
                        "{} {}",
                        self.cell(left, registry, half),
                        self.cell(right, registry, rest)
                    )
                }
            };
            writeln!(writer, "{line}")?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn render_to_string(
        &self,
        tree: &ContainerTree,
        registry: &CardRegistry,
    ) -> Result<String> {
        let mut buffer = Vec::new();
        self.render(&mut buffer, tree, registry)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn cell(&self, slot: &SlotNode, registry: &CardRegistry, width: usize) -> String {
        if width < 2 {
            return " ".repeat(width);
        }
        let inner = width - 2;
        let body = match slot {
            SlotNode::Card { card, handle, .. } => {
                let title = registry.title_of(card).unwrap_or_else(|| card.clone());
                let label = match handle {
                    Some(_) => format!("{} {}", self.settings.handle_glyph, title),
                    None => title,
                };
                pad(&truncate_to_width(&label, inner), inner)
            }
            SlotNode::Placeholder { dashed: true, .. } => {
                self.settings.dash_glyph.to_string().repeat(inner)
            }
            SlotNode::Placeholder { dashed: false, .. } => " ".repeat(inner),
        };
        format!("[{body}]")
    }
}

fn pad(text: &str, width: usize) -> String {
    let used = display_width(text);
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}
