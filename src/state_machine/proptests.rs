//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible responses.

use super::transition::*;
use super::*;
use crate::orchestrator::{StepOption, StepResponse};
use crate::session::{RegistrationData, Session, COMPLETED_STEP};
use crate::transcript::Direction;
use proptest::prelude::*;
use serde_json::Value;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_step() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("start".to_string()),
        Just(COMPLETED_STEP.to_string()),
        "[a-z_]{1,12}",
    ]
}

fn arb_open_session() -> impl Strategy<Value = Session> {
    ("[a-z0-9-]{1,12}", "[a-z_]{1,12}").prop_map(|(id, step)| {
        let mut session = Session::new();
        session.begin(id).unwrap();
        session.advance_step(step);
        session
    })
}

fn arb_option() -> impl Strategy<Value = StepOption> {
    prop_oneof![
        "[a-zA-Z0-9+-]{1,10}".prop_map(StepOption::Text),
        ("[a-z0-9]{1,6}", "[a-zA-Z0-9 ]{1,10}")
            .prop_map(|(value, label)| StepOption::Choice { value, label }),
    ]
}

fn arb_json_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        "[a-zA-Z0-9 @.+]{0,16}".prop_map(Value::String),
    ]
}

fn arb_registration_data() -> impl Strategy<Value = RegistrationData> {
    proptest::collection::vec(("[a-z_]{1,10}", arb_json_value()), 0..6)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn arb_success_response() -> impl Strategy<Value = StepResponse> {
    (
        proptest::option::of("[a-zA-Z ]{1,20}"),
        proptest::option::of(arb_step()),
        proptest::option::of(proptest::collection::vec(arb_option(), 0..5)),
        proptest::option::of(arb_registration_data()),
    )
        .prop_map(
            |(next_step_message, next_step, options, registration_data)| StepResponse {
                next_step_message,
                next_step,
                options,
                registration_data,
                ..StepResponse::default()
            },
        )
}

fn arb_error_response() -> impl Strategy<Value = StepResponse> {
    ("[a-zA-Z ]{1,30}", arb_success_response()).prop_map(|(error, mut response)| {
        response.error = Some(error);
        response
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// The step cursor only moves when a step message accompanies the response
    #[test]
    fn prop_step_only_advances_with_message(
        session in arb_open_session(),
        response in arb_success_response(),
    ) {
        let result = transition(
            &session,
            &StepPolicy::default(),
            Event::StepResponded(response.clone()),
        ).unwrap();

        match (&response.next_step_message, &response.next_step) {
            (Some(_), Some(step)) => prop_assert_eq!(result.session.current_step(), step.as_str()),
            _ => prop_assert_eq!(result.session.current_step(), session.current_step()),
        }
        prop_assert_eq!(result.session.conversation_id(), session.conversation_id());
    }

    /// An error response changes nothing and emits exactly the error
    #[test]
    fn prop_error_short_circuits(
        session in arb_open_session(),
        response in arb_error_response(),
    ) {
        let error = response.error.clone().unwrap();
        let result = transition(
            &session,
            &StepPolicy::default(),
            Event::StepResponded(response),
        ).unwrap();

        prop_assert_eq!(&result.session, &session);
        prop_assert_eq!(result.effects, vec![Effect::say(error)]);
    }

    /// Transport failure leaves the session untouched
    #[test]
    fn prop_submit_failure_preserves_session(
        session in arb_open_session(),
        message in "[a-z ]{0,20}",
    ) {
        let result = transition(&session, &StepPolicy::default(), Event::SubmitFailed { message }).unwrap();
        prop_assert_eq!(&result.session, &session);
        prop_assert_eq!(result.effects.len(), 1);
    }

    /// Emitted turns match the fired rules, in the fixed relative order
    #[test]
    fn prop_turns_follow_rule_order(
        session in arb_open_session(),
        response in arb_success_response(),
    ) {
        let result = transition(
            &session,
            &StepPolicy::default(),
            Event::StepResponded(response.clone()),
        ).unwrap();

        let mut expected: Vec<String> = Vec::new();
        if let Some(message) = &response.next_step_message {
            expected.push(message.clone());
        }
        if let Some(options) = &response.options {
            expected.push(render_options(options));
        }
        if let Some(data) = &response.registration_data {
            expected.push(render_summary(data));
            expected.push(CONFIRMATION_TEXT.to_string());
        }
        let completed = result.session.is_completed();
        if completed {
            expected.push(COMPLETION_TEXT.to_string());
        }

        let texts: Vec<String> = result.turns().map(|t| t.text.clone()).collect();
        prop_assert_eq!(texts, expected);
        prop_assert!(result.turns().all(|t| t.direction == Direction::System));
        prop_assert_eq!(result.effects.last() == Some(&Effect::CloseInput), completed);
    }

    /// The rendered summary carries every key with its JSON value, in order,
    /// and the snapshot stored is the mapping received
    #[test]
    fn prop_registration_data_round_trips(
        session in arb_open_session(),
        data in arb_registration_data(),
    ) {
        let result = transition(
            &session,
            &StepPolicy::default(),
            Event::StepResponded(StepResponse::default().with_registration_data(data.clone())),
        ).unwrap();

        prop_assert_eq!(result.session.registration_snapshot(), Some(&data));

        let summary = render_summary(&data);
        let lines: Vec<&str> = summary.lines().skip(1).collect();
        prop_assert_eq!(lines.len(), data.len());
        for (line, (key, value)) in lines.iter().zip(data.iter()) {
            let (rendered_key, rendered_value) = line.split_once(": ").unwrap();
            prop_assert_eq!(rendered_key, key.as_str());
            let parsed: Value = serde_json::from_str(rendered_value).unwrap();
            prop_assert_eq!(&parsed, value);
        }
    }

    /// Nothing is accepted once the dialogue has completed
    #[test]
    fn prop_completed_rejects_input(text in "[a-zA-Z ]{0,20}") {
        let mut session = Session::new();
        session.begin("c1").unwrap();
        session.advance_step(COMPLETED_STEP);

        let result = transition(&session, &StepPolicy::default(), Event::UserInput { text });
        prop_assert_eq!(result.unwrap_err(), TransitionError::DialogueCompleted);
    }
}
