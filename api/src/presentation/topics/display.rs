use crate::domain::topics::Topic;
use crate::presentation::topics::Key;

pub const DEFAULT_MAX_DISPLAY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    Default,
    #[default]
    Secondary,
    Outline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeSize {
    Default,
    #[default]
    Sm,
    Lg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub variant: BadgeVariant,
    pub size: BadgeSize,
    pub max_display: usize,
    pub clickable: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            variant: BadgeVariant::default(),
            size: BadgeSize::default(),
            max_display: DEFAULT_MAX_DISPLAY,
            clickable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagView {
    pub index: usize,
    pub label: String,
    pub variant: BadgeVariant,
    pub size: BadgeSize,
    pub interactive: bool,
}

impl TagView {
    pub fn role(&self) -> Option<&'static str> {
        self.interactive.then_some("button")
    }

    pub fn tab_index(&self) -> Option<i32> {
        self.interactive.then_some(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverflowView {
    pub remaining: usize,
    pub variant: BadgeVariant,
    pub size: BadgeSize,
}

impl OverflowView {
    pub fn label(&self) -> String {
        format!("+{} more", self.remaining)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayModel {
    pub tags: Vec<TagView>,
    pub overflow: Option<OverflowView>,
}

/// Projects topics onto badges. `None` means nothing is rendered.
pub fn render(topics: &[Topic], config: &DisplayConfig) -> Option<DisplayModel> {
    if topics.is_empty() {
        return None;
    }
    let tags = topics
        .iter()
        .take(config.max_display)
        .enumerate()
        .map(|(index, t)| TagView {
            index,
            label: t.to_string(),
            variant: config.variant,
            size: config.size,
            interactive: config.clickable,
        })
        .collect();
    let remaining = topics.len().saturating_sub(config.max_display);
    let overflow = (remaining > 0).then_some(OverflowView {
        remaining,
        variant: BadgeVariant::Outline,
        size: config.size,
    });
    Some(DisplayModel { tags, overflow })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Click,
    Key(Key),
}

pub struct TopicsDisplay<'a> {
    topics: Vec<Topic>,
    config: DisplayConfig,
    on_topic_click: Option<Box<dyn FnMut(&str) + 'a>>,
}

impl<'a> TopicsDisplay<'a> {
    pub fn new(topics: Vec<Topic>, config: DisplayConfig) -> Self {
        Self {
            topics,
            config,
            on_topic_click: None,
        }
    }

    pub fn on_topic_click(mut self, f: impl FnMut(&str) + 'a) -> Self {
        self.on_topic_click = Some(Box::new(f));
        self
    }

    pub fn render(&self) -> Option<DisplayModel> {
        render(&self.topics, &self.config)
    }

    /// Fires the click callback for the rendered tag at `index`. Returns whether it fired.
    pub fn activate(&mut self, index: usize, activation: Activation) -> bool {
        if !self.config.clickable || index >= self.topics.len().min(self.config.max_display) {
            return false;
        }
        let triggers = matches!(
            activation,
            Activation::Click | Activation::Key(Key::Enter) | Activation::Key(Key::Space)
        );
        if !triggers {
            return false;
        }
        match self.on_topic_click.as_mut() {
            Some(cb) => {
                cb(self.topics[index].as_str());
                true
            }
            None => false,
        }
    }
}
