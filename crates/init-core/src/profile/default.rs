//! Default webpack profile

use super::Profile;
use crate::answers::AnswerRecord;
use crate::error::Result;
use crate::plan::{
    self, ContextKind, Destination, Emission, EmissionPlan, When, DEV_SERVER, LANG_TYPE,
};
use crate::prompt::Prompter;
use crate::rules::{
    self, Collected, DefaultRule, Implied, Literal, PromptKind, Rule, RuleGroup, Trigger,
};

pub const CSS_TYPE: &str = "cssType";
pub const IS_CSS: &str = "isCSS";
pub const IS_POSTCSS: &str = "isPostCSS";
pub const EXTRACT_PLUGIN: &str = "extractPlugin";
pub const HTML_WEBPACK_PLUGIN: &str = "htmlWebpackPlugin";
pub const WORKBOX_WEBPACK_PLUGIN: &str = "workboxWebpackPlugin";

const CONFIG_FILE: &str = "webpack.config.js";

const JAVASCRIPT: &[Rule] = &[
    Rule {
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
                &["babel-loader", "@babel/core", "@babel/preset-env"],
            ),
            (Trigger::Choice("Typescript"), &["typescript", "ts-loader"]),
        ],
    },
    Rule {
        key: DEV_SERVER,
        message: "Do you want to use webpack-dev-server?",
        kind: PromptKind::Confirm,
        default: DefaultRule::Fixed(Literal::Bool(true)),
        implied: None,
        dependencies: &[(Trigger::Confirmed, &["webpack-dev-server"])],
    },
    Rule {
        key: HTML_WEBPACK_PLUGIN,
        message: "Do you want to simplify the creation of HTML files for your bundle?",
        kind: PromptKind::Confirm,
        default: DefaultRule::Fixed(Literal::Bool(true)),
        implied: None,
        dependencies: &[(Trigger::Confirmed, &["html-webpack-plugin"])],
    },
    Rule {
        key: WORKBOX_WEBPACK_PLUGIN,
        message: "Do you want to add PWA support?",
        kind: PromptKind::Confirm,
        default: DefaultRule::Fixed(Literal::Bool(true)),
        implied: None,
        dependencies: &[(Trigger::Confirmed, &["workbox-webpack-plugin"])],
    },
];

const STYLING: &[Rule] = &[
    Rule {
        key: CSS_TYPE,
        message: "Which of the following CSS solutions do you want to use?",
        kind: PromptKind::Select {
            candidates: &["none", "CSS only", "SASS", "LESS", "Stylus"],
        },
        default: DefaultRule::Fixed(Literal::Choice("none")),
        implied: None,
        dependencies: &[
            (Trigger::Choice("SASS"), &["sass-loader", "sass"]),
            (Trigger::Choice("LESS"), &["less-loader", "less"]),
            (Trigger::Choice("Stylus"), &["stylus-loader", "stylus"]),
        ],
    },
    Rule {
        key: IS_CSS,
        message: "Will you be using CSS styles along with {cssType} in your project?",
        kind: PromptKind::Confirm,
        default: DefaultRule::Fixed(Literal::Bool(true)),
        implied: Some(Implied {
            when_key: CSS_TYPE,
            equals: "CSS only",
            value: Literal::Bool(true),
        }),
        dependencies: &[(Trigger::Confirmed, &["style-loader", "css-loader"])],
    },
    Rule {
        key: IS_POSTCSS,
        message: "Will you be using PostCSS in your project?",
        kind: PromptKind::Confirm,
        default: DefaultRule::Matches {
            key: CSS_TYPE,
            value: "CSS only",
        },
        implied: None,
        dependencies: &[(
            Trigger::Confirmed,
            &["postcss-loader", "postcss", "autoprefixer"],
        )],
    },
    Rule {
        key: EXTRACT_PLUGIN,
        message: "Do you want to extract CSS for every file?",
        kind: PromptKind::Select {
            candidates: &["No", "Only for Production", "Yes"],
        },
        default: DefaultRule::Fixed(Literal::Choice("No")),
        implied: None,
        dependencies: &[(Trigger::Except("No"), &["mini-css-extract-plugin"])],
    },
];

const GROUPS: &[RuleGroup] = &[
    RuleGroup {
        name: "javascript",
        disable_on: None,
        rules: JAVASCRIPT,
    },
    RuleGroup {
        name: "styling",
        disable_on: Some("none"),
        rules: STYLING,
    },
];

const EMISSIONS: &[Emission] = &[
    Emission {
        template: "index.js",
        destination: Destination::Entry,
        context: ContextKind::Empty,
        when: When::Always,
    },
    Emission {
        template: "README.md",
        destination: Destination::Fixed("README.md"),
        context: ContextKind::Empty,
        when: When::Always,
    },
    Emission {
        template: "template.html",
        destination: Destination::Fixed("index.html"),
        context: ContextKind::Answers,
        when: When::Always,
    },
    Emission {
        template: "webpack.config.js",
        destination: Destination::Fixed(CONFIG_FILE),
        context: ContextKind::AnswersWithEntry,
        when: When::Always,
    },
    Emission {
        template: ".babelrc",
        destination: Destination::Fixed(".babelrc"),
        context: ContextKind::Empty,
        when: When::ChoiceIs {
            key: LANG_TYPE,
            value: "ES6",
        },
    },
    Emission {
        template: "tsconfig.json",
        destination: Destination::Fixed("tsconfig.json"),
        context: ContextKind::Empty,
        when: When::ChoiceIs {
            key: LANG_TYPE,
            value: "Typescript",
        },
    },
    Emission {
        template: "postcss.config.js",
        destination: Destination::Fixed("postcss.config.js"),
        context: ContextKind::Empty,
        when: When::Confirmed(IS_POSTCSS),
    },
];

/// Keys read by the HTML and webpack config templates
const CONTEXT_KEYS: &[&str] = &[
    LANG_TYPE,
    DEV_SERVER,
    HTML_WEBPACK_PLUGIN,
    WORKBOX_WEBPACK_PLUGIN,
    CSS_TYPE,
    IS_CSS,
    IS_POSTCSS,
    EXTRACT_PLUGIN,
];

/// Plain webpack project with optional language, styling and PWA tooling
#[derive(Debug, Clone, Copy, Default)]
pub struct WebpackProfile;

impl Profile for WebpackProfile {
    fn name(&self) -> &'static str {
        "default"
    }

    fn description(&self) -> &'static str {
        "webpack project with optional ES6/TypeScript, CSS preprocessors and PWA support"
    }

    fn questions(&self, prompter: &mut dyn Prompter, force: bool) -> Result<Collected> {
        rules::evaluate(Collected::default(), GROUPS, prompter, force)
    }

    fn plan(&self, answers: &AnswerRecord) -> Result<EmissionPlan> {
        plan::require_keys(answers, CONTEXT_KEYS)?;
        let entry = plan::entry_path(answers)?;

        Ok(EmissionPlan {
            profile: self.name(),
            files: plan::plan_files(EMISSIONS, answers, &entry)?,
            config_path: Some(CONFIG_FILE.into()),
            manifest: plan::manifest_patch(answers.get_bool(DEV_SERVER)?),
            entry,
        })
    }
}
