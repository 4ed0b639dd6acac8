use chemdrill::content::{Catalog, InputKind};
use chemdrill::markup::{Segment, render};
use chemdrill::session::input::UserInputs;
use chemdrill::session::{Action, Session, View};

fn bundled() -> Catalog {
    Catalog::bundled().expect("bundled catalog is valid")
}

/// Every piece of learner-facing text in a catalog, in display order.
fn all_texts(catalog: &Catalog) -> Vec<&str> {
    let mut out = Vec::new();
    for problem in catalog.problems() {
        out.push(problem.title.as_str());
        out.extend(problem.description.as_deref());
        out.extend(problem.equations.iter().map(String::as_str));
        for question in &problem.questions {
            out.push(question.text.as_str());
            out.extend(question.options.iter().map(String::as_str));
        }
        out.extend(problem.answers.values().map(String::as_str));
        out.extend(problem.explanation_points.iter().map(String::as_str));
        for branch in &problem.branches {
            out.push(branch.diagnosis.as_str());
            out.push(branch.remediation.content.as_str());
            out.extend(branch.remediation.points.iter().map(String::as_str));
        }
    }
    out
}

#[test]
fn bundled_catalog_text_renders_cleanly() {
    let catalog = bundled();
    for text in all_texts(&catalog) {
        for segment in render(text) {
            match &segment {
                Segment::Text(value) | Segment::Subscript(value) | Segment::Superscript(value) => {
                    assert!(!value.is_empty(), "empty segment in {text:?}");
                    assert!(!value.contains('\n'), "newline leaked in {text:?}");
                    assert!(!value.contains('$'), "unpaired math delimiter in {text:?}");
                    assert!(!value.contains("\\text"), "unexpanded \\text in {text:?}");
                    assert!(!value.contains("\\to"), "unexpanded arrow in {text:?}");
                }
                Segment::Break => {}
            }
        }
    }
}

#[test]
fn bundled_choice_answers_are_offered_options() {
    let catalog = bundled();
    for problem in catalog.problems() {
        for question in &problem.questions {
            let Some(answer) = problem.answer(&question.id) else {
                continue;
            };
            match question.input {
                InputKind::SelectionSingle => assert!(
                    question.offers(answer),
                    "{}/{}: answer {answer:?} is not an option",
                    problem.id,
                    question.id
                ),
                InputKind::SelectionMulti => {
                    for part in answer.split(", ") {
                        assert!(
                            question.offers(part),
                            "{}/{}: answer part {part:?} is not an option",
                            problem.id,
                            question.id
                        );
                    }
                }
                InputKind::Text => {}
            }
        }
    }
}

#[test]
fn walk_every_chapter_and_its_remediations() {
    let catalog = bundled();
    let mut session = Session::new(&catalog);
    assert!(session.apply(Action::Start));

    for index in 0..catalog.len() {
        assert_eq!(session.index(), index);
        assert_eq!(session.view(), View::Problem);
        assert!(!session.can_analyze());
        assert!(session.apply(Action::Reveal));
        assert!(session.apply(Action::Analyze));

        let problem = session.current_problem();
        for branch in &problem.branches {
            assert!(session.apply(Action::SelectBranch(branch.id.clone())));
            assert_eq!(session.selected_branch().map(|b| b.id.as_str()), Some(branch.id.as_str()));
            assert!(session.apply(Action::Back));
            assert_eq!(session.view(), View::Analysis);
        }

        assert!(session.apply(Action::Back));
        assert!(session.is_revealed());
        let advanced = session.apply(Action::Next);
        assert_eq!(advanced, index + 1 < catalog.len());
    }

    assert!(!session.has_next());
    assert!(session.apply(Action::Home));
    assert_eq!(session.view(), View::Home);
    assert_eq!(session.index(), catalog.last_index());
}

#[test]
fn answers_are_scoped_to_the_problem() {
    let catalog = bundled();
    let mut session = Session::new(&catalog);
    session.apply(Action::Start);

    let problem = session.current_problem();
    let text_q = problem
        .questions
        .iter()
        .find(|q| q.input == InputKind::Text)
        .expect("first chapter has a free-text question");
    let multi_q = problem
        .questions
        .iter()
        .find(|q| q.input == InputKind::SelectionMulti)
        .expect("first chapter has a multi-choice question");

    assert!(session.apply(Action::EditText {
        question: text_q.id.clone(),
        value: "+7".to_string(),
    }));
    assert!(session.apply(Action::Choose {
        question: multi_q.id.clone(),
        option: multi_q.options[0].clone(),
    }));
    let inputs: &UserInputs = session.inputs();
    assert_eq!(inputs.len(), 2);

    // Home and back keeps the work on the same problem.
    session.apply(Action::Home);
    session.apply(Action::Start);
    assert_eq!(session.inputs().text(&text_q.id), Some("+7"));

    // Moving away and back starts fresh.
    session.apply(Action::Next);
    session.apply(Action::Prev);
    assert!(session.inputs().is_empty());
    assert!(!session.is_revealed());
}
