//! Static catalog of the fortune test types. Immutable, resolved by slug;
//! an unknown slug is the 404 path of `/api/analyze`.

use serde::Serialize;

/// Tailwind-style theme tokens the result card is rendered with.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ThemeColor {
    pub primary: &'static str,
    pub background: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
}

/// The selector the rule engine branches on: it decides which table field
/// is routed into the `future_partner` slot of the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestKind {
    Love,
    Work,
    Wealth,
}

/// Which inputs the wizard collects for a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TestInput {
    BirthDate,
    BirthTime,
    Gender,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestConfig {
    pub slug: &'static str,
    #[serde(skip)]
    pub kind: TestKind,
    pub title: &'static str,
    pub description: &'static str,
    pub theme_color: ThemeColor,
    /// The persona handed to the LLM engine as system instructions.
    #[serde(skip)]
    pub system_prompt: &'static str,
    pub inputs: [TestInput; 3],
}

const ALL_INPUTS: [TestInput; 3] = [TestInput::BirthDate, TestInput::BirthTime, TestInput::Gender];

pub const TESTS: [TestConfig; 3] = [
    TestConfig {
        slug: "love",
        kind: TestKind::Love,
        title: "찐 사랑 찾기 사주 테스트",
        description: "나의 연애 운세와 미래의 연인을 찾아보세요.",
        theme_color: ThemeColor {
            primary: "bg-pink-500",
            background: "bg-pink-50",
            text: "text-pink-900",
            accent: "text-pink-600",
        },
        system_prompt: "당신은 팩트 폭격을 날리는 연애 컨설턴트입니다. 사용자의 사주 정보를 바탕으로 연애 성향, 미래 배우자의 특징, 연애 조언을 직설적이고 유머러스하게 해설해주세요. 결과는 JSON 포맷으로 \"summary\", \"personality\", \"future_partner\", \"advice\" 키를 포함해야 합니다.",
        inputs: ALL_INPUTS,
    },
    TestConfig {
        slug: "work",
        kind: TestKind::Work,
        title: "직장/사업 운세 테스트",
        description: "나에게 맞는 직업과 성공 전략을 알아보세요.",
        theme_color: ThemeColor {
            primary: "bg-blue-600",
            background: "bg-blue-50",
            text: "text-blue-900",
            accent: "text-blue-700",
        },
        system_prompt: "당신은 냉철한 커리어 코치입니다. 사용자의 사주를 분석하여 적합한 직무, 직장 내 처세술, 사업 운을 분석해주세요. 현실적이고 구체적인 조언을 제공하세요.",
        inputs: ALL_INPUTS,
    },
    TestConfig {
        slug: "wealth",
        kind: TestKind::Wealth,
        title: "재물운 대박 테스트",
        description: "나의 타고난 재물 그릇과 돈 버는 법.",
        theme_color: ThemeColor {
            primary: "bg-yellow-500",
            background: "bg-yellow-50",
            text: "text-yellow-900",
            accent: "text-yellow-700",
        },
        system_prompt: "당신은 전설적인 투자 전문가입니다. 사주를 통해 재물운의 흐름, 돈을 모으는 방법, 주의해야 할 지출 습관을 분석해주세요.",
        inputs: ALL_INPUTS,
    },
];

/// Looks up a test by its URL slug.
pub fn test_config(slug: &str) -> Option<&'static TestConfig> {
    TESTS.iter().find(|t| t.slug == slug)
}
