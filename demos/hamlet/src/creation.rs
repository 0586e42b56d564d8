//! Text rendering for the character-creation flow, driven by a canned script.

use rv_trigger::{Character, CreationCatalog, CreationFlowState, FlowInput, Prompt, Rejection};

pub fn catalog() -> CreationCatalog {
    CreationCatalog::new(
        ["Riverfolk", "Hill clan", "Wanderer"],
        ["Stubborn", "Curious", "Herbalist"],
    )
}

/// Answers a new player might type, including a few mistakes.
pub fn script() -> Vec<FlowInput> {
    vec![
        FlowInput::Answer(String::new()),
        FlowInput::Answer("Wren".into()),
        FlowInput::Answer("9".into()),
        FlowInput::Answer("2".into()),
        FlowInput::Back,
        FlowInput::Answer("wanderer".into()),
        FlowInput::Answer("Curious".into()),
        FlowInput::Answer("yes".into()),
    ]
}

/// Feed `inputs` through the flow, printing each prompt.
pub fn run(catalog: &CreationCatalog, inputs: Vec<FlowInput>) -> Option<Character> {
    let mut step = CreationFlowState::begin(catalog);
    println!("  > {}", render(&step.prompt));
    for input in inputs {
        if step.done {
            break;
        }
        println!("  < {}", echo(&input));
        step = step.state.step(catalog, input);
        println!("  > {}", render(&step.prompt));
    }
    step.state.character()
}

fn echo(input: &FlowInput) -> String {
    match input {
        FlowInput::Answer(text) => format!("{text:?}"),
        FlowInput::Back         => "(back)".into(),
        FlowInput::Restart      => "(restart)".into(),
    }
}

fn render(prompt: &Prompt) -> String {
    match prompt {
        Prompt::AskName => "What is your name?".into(),
        Prompt::ChooseOrigin { options } => format!("Where are you from? {}", numbered(options)),
        Prompt::ChooseTrait { options } => format!("What marks you out? {}", numbered(options)),
        Prompt::Confirm { summary } => format!(
            "{}, {}, {}. Is that right? (yes/no)",
            summary.name.as_deref().unwrap_or("?"),
            summary.origin.as_deref().unwrap_or("?"),
            summary.trait_name.as_deref().unwrap_or("?"),
        ),
        Prompt::Rejected { reason, retry } => {
            format!("{} {}", rejection(reason), render(retry))
        }
        Prompt::Finished { character } => format!(
            "Welcome to Ashford, {} ({}, {}).",
            character.name, character.origin, character.trait_name
        ),
    }
}

fn rejection(reason: &Rejection) -> String {
    match reason {
        Rejection::EmptyName            => "A name, please.".into(),
        Rejection::NameTooLong { max }  => format!("Keep it under {max} letters."),
        Rejection::UnknownOption(given) => format!("{given:?} is not one of the choices."),
        Rejection::ExpectedYesOrNo      => "Answer yes or no.".into(),
    }
}

fn numbered(options: &[String]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, o)| format!("[{}] {o}", i + 1))
        .collect::<Vec<_>>()
        .join(" ")
}
