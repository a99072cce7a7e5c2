//! React profile
//!
//! Always serves through webpack-dev-server. Writes no template files of its
//! own; the generated project gets its `package.json` scripts only, and the
//! next steps point at the entry module to create.

use super::Profile;
use crate::answers::AnswerRecord;
use crate::error::Result;
use crate::plan::{self, EmissionPlan, DEV_SERVER, LANG_TYPE};
use crate::prompt::Prompter;
use crate::rules::{self, Collected, DefaultRule, Literal, PromptKind, Rule, RuleGroup, Trigger};

const JAVASCRIPT: &[Rule] = &[Rule {
    key: LANG_TYPE,
    message: "Which of the following JS solutions do you want to use?",
    kind: PromptKind::Select {
        candidates: &["none", "ES6", "Typescript"],
    },
    default: DefaultRule::Fixed(Literal::Choice("none")),
    implied: None,
    dependencies: &[
        (
            Trigger::Choice("ES6"),
            &[
                "babel-loader",
                "@babel/core",
                "@babel/preset-env",
                "@babel/preset-react",
            ],
        ),
        (Trigger::Choice("Typescript"), &["typescript", "ts-loader"]),
    ],
}];

const GROUPS: &[RuleGroup] = &[RuleGroup {
    name: "javascript",
    disable_on: None,
    rules: JAVASCRIPT,
}];

#[derive(Debug, Clone, Copy, Default)]
pub struct ReactProfile;

impl Profile for ReactProfile {
    fn name(&self) -> &'static str {
        "react"
    }

    fn description(&self) -> &'static str {
        "React application served by webpack-dev-server"
    }

    fn questions(&self, prompter: &mut dyn Prompter, force: bool) -> Result<Collected> {
        let mut seed = Collected::default();
        seed.dependencies.append("webpack-dev-server");
        seed.answers = seed.answers.with(DEV_SERVER, true);

        rules::evaluate(seed, GROUPS, prompter, force)
    }

    fn plan(&self, answers: &AnswerRecord) -> Result<EmissionPlan> {
        Ok(EmissionPlan {
            profile: self.name(),
            entry: plan::entry_path(answers)?,
            config_path: None,
            files: Vec::new(),
            // Older answer files may lack devServer; React always serves
            manifest: plan::manifest_patch(answers.bool_or(DEV_SERVER, true)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::AnswerValue;
    use crate::rules::testing::ScriptedPrompter;

    #[test]
    fn test_dev_server_always_first() {
        let mut prompter = ScriptedPrompter::with([(LANG_TYPE, AnswerValue::choice("ES6"))]);
        let collected = ReactProfile.questions(&mut prompter, false).unwrap();

        assert_eq!(
            collected.dependencies.snapshot(),
            [
                "webpack-dev-server",
                "babel-loader",
                "@babel/core",
                "@babel/preset-env",
                "@babel/preset-react",
            ]
        );
        assert_eq!(prompter.asked, vec![LANG_TYPE]);
    }

    #[test]
    fn test_force_defaults() {
        let mut prompter = ScriptedPrompter::default();
        let collected = ReactProfile.questions(&mut prompter, true).unwrap();

        assert!(prompter.asked.is_empty());
        assert_eq!(collected.dependencies.snapshot(), ["webpack-dev-server"]);
        assert_eq!(collected.answers.get_choice(LANG_TYPE).unwrap(), "none");
    }

    #[test]
    fn test_plan_has_serve_script_and_no_files() {
        let answers = AnswerRecord::new().with(LANG_TYPE, "Typescript");
        let plan = ReactProfile.plan(&answers).unwrap();

        assert_eq!(plan.entry, "./src/index.ts");
        assert!(plan.files.is_empty());
        assert_eq!(plan.manifest["scripts"]["serve"], "webpack serve");
        assert_eq!(
            ReactProfile.next_steps(&plan, "npm run"),
            vec!["create your entry module at ./src/index.ts"]
        );
    }
}
