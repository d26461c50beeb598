mod app {
    mod input_tests;
}

mod domain {
    mod answers_tests;
    mod builder_tests;
    mod layout_tests;
    mod link_tests;
    mod template_tests;
}

mod form {
    mod field_tests;
    mod session_tests;
    mod state_tests;
}

mod presentation {
    mod renderer_tests;
    mod view_tests;
}

mod store {
    mod json_file_tests;
    mod memory_tests;

    use crate::domain::{AnswerSet, AnswerValue, FormSubmission};

    fn submission(id: &str, form_id: &str) -> FormSubmission {
        let mut answers = AnswerSet::default();
        answers.set("q1", AnswerValue::Text("yes".into()));
        FormSubmission {
            id: id.into(),
            form_id: form_id.into(),
            client_id: None,
            client_name: None,
            answers,
            submitted_at: 1_700_000_000_000,
        }
    }
}
