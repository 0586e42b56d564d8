//! Character creation as an explicit state machine.
//!
//! The host keeps a [`CreationFlowState`] between turns and feeds each user
//! input to [`CreationFlowState::step`], which returns the next prompt and the
//! updated state.  Nothing is held on a suspended call stack, so the state can
//! be stored in a save game and resumed later.
//!
//! ```text
//!        Answer            Answer             Answer          "yes"
//!  Name ───────▶ Origin ───────▶ Trait ───────▶ Confirm ───────▶ Done
//!   ▲   ◀─────── Back   ◀─────── Back  ◀─────── Back/"no"
//!   └──────────────────── Restart (from any step but Done)
//! ```

/// Longest accepted character name, in characters.
pub const MAX_NAME_CHARS: usize = 24;

// ── State ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CreationStep {
    #[default]
    Name,
    Origin,
    Trait,
    Confirm,
    Done,
}

/// Answers gathered so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreationFields {
    pub name:       Option<String>,
    pub origin:     Option<String>,
    pub trait_name: Option<String>,
}

/// A finished character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub name:       String,
    pub origin:     String,
    pub trait_name: String,
}

/// One in-progress creation flow.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreationFlowState {
    pub step:   CreationStep,
    pub fields: CreationFields,
}

/// The choices offered by the origin and trait steps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreationCatalog {
    pub origins: Vec<String>,
    pub traits:  Vec<String>,
}

impl CreationCatalog {
    pub fn new<S: Into<String>>(
        origins: impl IntoIterator<Item = S>,
        traits: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            origins: origins.into_iter().map(Into::into).collect(),
            traits:  traits.into_iter().map(Into::into).collect(),
        }
    }
}

// ── Inputs and outputs ────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowInput {
    Answer(String),
    /// Roll back one step.
    Back,
    /// Discard everything and start over.
    Restart,
}

/// Why an answer was not accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    EmptyName,
    NameTooLong { max: usize },
    UnknownOption(String),
    ExpectedYesOrNo,
}

/// What the host should ask next.  Structured data; rendering is the host's job.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prompt {
    AskName,
    ChooseOrigin { options: Vec<String> },
    ChooseTrait { options: Vec<String> },
    Confirm { summary: CreationFields },
    /// The last answer was rejected; ask `retry` again.
    Rejected { reason: Rejection, retry: Box<Prompt> },
    Finished { character: Character },
}

/// Result of one step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowStep {
    pub prompt: Prompt,
    pub state:  CreationFlowState,
    pub done:   bool,
}

// ── Transitions ───────────────────────────────────────────────────────────────

impl CreationFlowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The opening step of a fresh flow.
    pub fn begin(catalog: &CreationCatalog) -> FlowStep {
        Self::new().into_step(catalog)
    }

    pub fn is_done(&self) -> bool {
        self.step == CreationStep::Done
    }

    /// The finished character, once the flow is done.
    pub fn character(&self) -> Option<Character> {
        if !self.is_done() {
            return None;
        }
        Some(Character {
            name:       self.fields.name.clone()?,
            origin:     self.fields.origin.clone()?,
            trait_name: self.fields.trait_name.clone()?,
        })
    }

    /// The prompt for the current step.
    pub fn prompt(&self, catalog: &CreationCatalog) -> Prompt {
        match self.step {
            CreationStep::Name    => Prompt::AskName,
            CreationStep::Origin  => Prompt::ChooseOrigin { options: catalog.origins.clone() },
            CreationStep::Trait   => Prompt::ChooseTrait { options: catalog.traits.clone() },
            CreationStep::Confirm => Prompt::Confirm { summary: self.fields.clone() },
            CreationStep::Done    => match self.character() {
                Some(character) => Prompt::Finished { character },
                None            => Prompt::AskName,
            },
        }
    }

    /// Apply one input.  A finished flow ignores further input.
    pub fn step(mut self, catalog: &CreationCatalog, input: FlowInput) -> FlowStep {
        if self.is_done() {
            return self.into_step(catalog);
        }
        match input {
            FlowInput::Restart => Self::new().into_step(catalog),
            FlowInput::Back => {
                self.back();
                self.into_step(catalog)
            }
            FlowInput::Answer(answer) => match self.accept(catalog, answer.trim()) {
                Ok(()) => self.into_step(catalog),
                Err(reason) => {
                    let retry = Box::new(self.prompt(catalog));
                    FlowStep { prompt: Prompt::Rejected { reason, retry }, state: self, done: false }
                }
            },
        }
    }

    fn into_step(self, catalog: &CreationCatalog) -> FlowStep {
        FlowStep { prompt: self.prompt(catalog), done: self.is_done(), state: self }
    }

    fn back(&mut self) {
        self.step = match self.step {
            CreationStep::Name | CreationStep::Origin => CreationStep::Name,
            CreationStep::Trait                       => CreationStep::Origin,
            CreationStep::Confirm                     => CreationStep::Trait,
            CreationStep::Done                        => CreationStep::Done,
        };
        // The step being returned to is asked again from scratch.
        match self.step {
            CreationStep::Name   => self.fields.name = None,
            CreationStep::Origin => self.fields.origin = None,
            CreationStep::Trait  => self.fields.trait_name = None,
            _ => {}
        }
    }

    fn accept(&mut self, catalog: &CreationCatalog, answer: &str) -> Result<(), Rejection> {
        match self.step {
            CreationStep::Name => {
                if answer.is_empty() {
                    return Err(Rejection::EmptyName);
                }
                if answer.chars().count() > MAX_NAME_CHARS {
                    return Err(Rejection::NameTooLong { max: MAX_NAME_CHARS });
                }
                self.fields.name = Some(answer.to_owned());
                self.step = CreationStep::Origin;
            }
            CreationStep::Origin => {
                self.fields.origin = Some(pick(&catalog.origins, answer)?);
                self.step = CreationStep::Trait;
            }
            CreationStep::Trait => {
                self.fields.trait_name = Some(pick(&catalog.traits, answer)?);
                self.step = CreationStep::Confirm;
            }
            CreationStep::Confirm => match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => self.step = CreationStep::Done,
                "n" | "no"  => self.back(),
                _ => return Err(Rejection::ExpectedYesOrNo),
            },
            CreationStep::Done => {}
        }
        Ok(())
    }
}

/// Match `answer` against `options` by 1-based index or case-insensitive name.
fn pick(options: &[String], answer: &str) -> Result<String, Rejection> {
    if let Ok(n) = answer.parse::<usize>() {
        if let Some(option) = n.checked_sub(1).and_then(|i| options.get(i)) {
            return Ok(option.clone());
        }
    }
    options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(answer))
        .cloned()
        .ok_or_else(|| Rejection::UnknownOption(answer.to_owned()))
}
