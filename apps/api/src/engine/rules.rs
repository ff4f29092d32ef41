//! Rule-based interpretation: a fixed reading per Day Master stem.
//!
//! The table is total over the ten stems by construction — the lookup is an
//! enum match, so an "unknown Day Master" cannot reach this module. The
//! composition step reuses the generic `future_partner` slot for the
//! selector-matched field so the response schema stays identical across
//! test types.

use async_trait::async_trait;

use crate::catalog::TestKind;
use crate::errors::AppError;
use crate::models::AnalysisResult;
use crate::saju::Stem;

use super::{AnalysisContext, AnalysisEngine};

/// Fixed narrative strings for one Day Master.
#[derive(Debug, Clone, Copy)]
pub struct DayMasterReading {
    pub feature: &'static str,
    pub summary: &'static str,
    pub personality: &'static str,
    pub love: &'static str,
    pub work: &'static str,
    pub wealth: &'static str,
    pub advice: &'static str,
}

/// The ten canonical readings, keyed by the day pillar's heavenly stem.
pub fn day_master_reading(stem: Stem) -> &'static DayMasterReading {
    match stem {
        Stem::Gap => &GAP,
        Stem::Eul => &EUL,
        Stem::Byeong => &BYEONG,
        Stem::Jeong => &JEONG,
        Stem::Mu => &MU,
        Stem::Gi => &GI,
        Stem::Gyeong => &GYEONG,
        Stem::Sin => &SIN,
        Stem::Im => &IM,
        Stem::Gye => &GYE,
    }
}

static GAP: DayMasterReading = DayMasterReading {
    feature: "하늘을 향해 곧게 자라는 큰 나무",
    summary: "갑목 일간의 당신은 숲의 우두머리 나무처럼 당당하고 진취적인 사람입니다.",
    personality:
        "리더십이 강하고 한번 정한 목표를 향해 굽힘 없이 나아갑니다. 자존심이 강해 남에게 숙이는 것을 어려워하지만, 그만큼 책임감 있게 주변을 이끄는 기둥 같은 존재입니다.",
    love: "연애에서도 주도권을 쥐는 스타일입니다. 당신의 고집을 부드럽게 받아주면서도 할 말은 하는, 심지 곧은 상대를 만날 때 오래갑니다.",
    work: "조직의 장이나 전문직처럼 재량이 큰 자리에서 능력이 폭발합니다. 지시받는 일보다 판을 직접 설계하는 일이 맞습니다.",
    wealth: "큰돈을 한 번에 좇기보다 나무가 자라듯 길게 쌓는 재물운입니다. 무리한 확장만 경계하면 말년으로 갈수록 곳간이 커집니다.",
    advice: "꺾이지 않는 것이 장점이자 약점입니다. 가끔은 바람에 흔들리는 유연함이 당신의 뿌리를 더 깊게 만듭니다.",
};

static EUL: DayMasterReading = DayMasterReading {
    feature: "바위 틈에서도 피어나는 들풀",
    summary: "을목 일간의 당신은 어떤 환경에서도 길을 찾아내는 유연하고 생명력 강한 사람입니다.",
    personality:
        "부드러워 보이지만 속은 누구보다 질깁니다. 상황 판단이 빠르고 사람의 마음을 읽는 감각이 뛰어나 어디서든 자연스럽게 스며듭니다.",
    love: "상대에게 맞춰주는 세심한 연애를 합니다. 당신의 배려를 당연하게 여기지 않고 든든한 버팀목이 되어주는 사람이 천생연분입니다.",
    work: "협상, 기획, 상담처럼 사람 사이를 잇는 일에서 빛납니다. 정면 돌파보다 우회로를 찾는 당신의 책략이 조직의 무기가 됩니다.",
    wealth: "인맥이 곧 재물로 이어지는 사주입니다. 혼자 움켜쥐기보다 함께 나눌 때 더 큰 기회가 덩굴처럼 따라옵니다.",
    advice: "남에게 맞추느라 정작 자신의 꽃을 미루지 마세요. 가끔은 '싫다'고 말하는 것이 당신을 지킵니다.",
};

static BYEONG: DayMasterReading = DayMasterReading {
    feature: "만물을 비추는 한낮의 태양",
    summary: "병화 일간의 당신은 주변을 환하게 밝히는 타고난 에너지의 소유자입니다.",
    personality:
        "열정적이고 솔직하며 숨기는 것이 없습니다. 어디서든 시선을 모으는 존재감이 있고, 베푸는 것을 아까워하지 않는 화통한 성격입니다.",
    love: "불같이 시작하는 연애를 합니다. 당신의 열기를 부담스러워하지 않고 함께 타오르거나, 차분히 식혀줄 수 있는 상대가 필요합니다.",
    work: "무대, 영업, 교육처럼 사람 앞에 서는 일이 천직입니다. 뒤에서 묵묵히 하는 일은 당신의 빛을 가둡니다.",
    wealth: "돈이 크게 들어오고 크게 나가는 흐름입니다. 빛나는 소비 대신 꾸준한 적립 습관 하나만 들이면 재물이 마릅니다 걱정은 없습니다.",
    advice: "태양은 매일 뜨지만 한낮만 계속되지는 않습니다. 에너지를 아껴 쓰는 법을 배우면 더 오래 빛납니다.",
};

static JEONG: DayMasterReading = DayMasterReading {
    feature: "어둠 속을 밝히는 등불",
    summary: "정화 일간의 당신은 은은하지만 꺼지지 않는 온기로 사람을 끌어당깁니다.",
    personality:
        "섬세하고 따뜻하며 한 사람 한 사람을 깊게 살핍니다. 겉은 조용하지만 내면에는 쉽게 꺼지지 않는 심지가 타고 있습니다.",
    love: "오래 타는 촛불 같은 사랑을 합니다. 화려한 이벤트보다 매일의 온기를 알아봐 주는 사람과 깊어집니다.",
    work: "연구, 의료, 예술처럼 집중과 정성이 필요한 분야에서 독보적입니다. 요란한 경쟁판보다 몰입할 수 있는 환경을 고르세요.",
    wealth: "재물이 폭발하기보다 심지처럼 천천히, 그러나 확실하게 쌓입니다. 믿을 만한 사람과의 동업이 의외의 불씨가 됩니다.",
    advice: "남을 비추느라 자신을 태우지 마세요. 당신의 불꽃은 지키는 만큼 오래갑니다.",
};

static MU: DayMasterReading = DayMasterReading {
    feature: "흔들림 없는 큰 산",
    summary: "무토 일간의 당신은 어떤 풍파에도 묵직하게 자리를 지키는 산 같은 사람입니다.",
    personality:
        "신중하고 과묵하며 무게감이 있습니다. 말수는 적어도 한번 한 약속은 반드시 지켜, 주변 사람들이 기대어 쉬는 언덕이 됩니다.",
    love: "쉽게 마음을 열지 않지만 한번 품으면 끝까지 갑니다. 당신의 무뚝뚝함 뒤의 진심을 알아보는 살가운 상대가 잘 맞습니다.",
    work: "금융, 행정, 건설처럼 신뢰가 자산인 분야에서 인정받습니다. 잦은 이직보다 한 우물을 파는 쪽이 크게 됩니다.",
    wealth: "부동산과 인연이 깊은 묵직한 재물운입니다. 단타의 유혹만 이겨내면 산처럼 쌓인 자산을 봅니다.",
    advice: "산도 가끔은 길을 내어줘야 사람이 찾아옵니다. 먼저 다가가는 한마디가 당신의 세계를 넓힙니다.",
};

static GI: DayMasterReading = DayMasterReading {
    feature: "만물을 길러내는 기름진 밭",
    summary: "기토 일간의 당신은 무엇이든 품어 길러내는 너른 밭 같은 사람입니다.",
    personality:
        "포용력이 크고 실속이 있습니다. 겉으로 드러내지 않으면서 조용히 실리를 챙기고, 맡은 일은 빈틈없이 마무리하는 현실주의자입니다.",
    love: "상대를 키우고 보살피는 연애를 합니다. 받기만 하는 사람 말고, 당신의 헌신에 같은 정성으로 답하는 사람을 고르세요.",
    work: "교육, 관리, 컨설팅처럼 사람과 일을 함께 기르는 자리가 맞습니다. 화려한 전면보다 실권 있는 2인자 자리에서 오래갑니다.",
    wealth: "꾸준히 갈수록 비옥해지는 재물운입니다. 소문난 한탕보다 당신이 잘 아는 밭에 씨를 뿌리는 투자가 답입니다.",
    advice: "모두를 품다 보면 정작 자기 몫의 수확을 놓칩니다. 당신의 밭에도 울타리가 필요합니다.",
};

static GYEONG: DayMasterReading = DayMasterReading {
    feature: "벼려지기를 기다리는 단단한 무쇠",
    summary: "경금 일간의 당신은 결단력과 의리로 승부하는 강철 같은 사람입니다.",
    personality:
        "맺고 끊음이 분명하고 불의를 참지 못합니다. 거칠어 보여도 속정이 깊어, 내 사람이라 여기면 손해를 감수하고도 지킵니다.",
    love: "밀당 없는 직진 연애파입니다. 돌려 말하지 않는 당신의 화법에 상처받지 않고 시원하게 받아치는 상대와 불꽃이 튑니다.",
    work: "군, 경, 법, 스포츠처럼 승부와 기강이 있는 분야에서 두각을 드러냅니다. 애매한 타협이 많은 조직은 당신을 무디게 합니다.",
    wealth: "벼린 칼처럼 집중할 때 재물이 열립니다. 여러 곳에 찔러보는 투자보다 확신 있는 한 곳에 베팅하는 편이 맞습니다.",
    advice: "쇠는 불을 만나야 명검이 됩니다. 당신을 단련시키는 시련을 피하지 말고 통과하세요.",
};

static SIN: DayMasterReading = DayMasterReading {
    feature: "세공을 마친 반짝이는 보석",
    summary: "신금 일간의 당신은 날카로운 안목과 세련미를 갖춘 보석 같은 사람입니다.",
    personality:
        "완벽주의 기질이 있고 미적 감각이 탁월합니다. 예리한 말솜씨로 핵심을 짚어내며, 스스로에게 가장 엄격한 기준을 들이댑니다.",
    love: "아무나 곁에 두지 않는 까다로운 연애를 합니다. 당신의 가치를 알아보고 정성스럽게 다뤄주는 사람에게만 빛을 보여줍니다.",
    work: "디자인, 금융, 정밀한 전문직처럼 디테일이 생명인 분야가 천직입니다. 대충을 요구하는 환경에서는 금세 시들해집니다.",
    wealth: "안목이 곧 돈이 되는 사주입니다. 가치를 알아보는 눈을 믿되, 완벽한 때를 기다리다 기회를 놓치는 것만 조심하세요.",
    advice: "보석의 흠집만 들여다보면 빛나는 전체를 놓칩니다. 자신에게도 남에게도 칠십 점을 허락하세요.",
};

static IM: DayMasterReading = DayMasterReading {
    feature: "끝을 알 수 없는 깊은 바다",
    summary: "임수 일간의 당신은 큰 그림을 그리는 바다처럼 깊고 담대한 사람입니다.",
    personality:
        "지혜롭고 포부가 크며 속을 쉽게 드러내지 않습니다. 어떤 이야기든 받아들이는 깊이가 있어 사람들이 고민을 들고 찾아옵니다.",
    love: "잔잔해 보여도 속에는 큰 파도가 칩니다. 당신의 깊은 속을 캐묻기보다 믿고 기다려주는 상대와 바다처럼 오래갑니다.",
    work: "전략, 무역, 연구처럼 판이 큰 일이 어울립니다. 좁은 어항 같은 일터는 당신의 스케일을 버티지 못합니다.",
    wealth: "물길처럼 흐름을 타는 재물운입니다. 목돈이 들고 나는 폭이 크니, 밀물일 때 일부를 따로 가두는 둑을 쌓으세요.",
    advice: "바다는 깊어서 위험하기도 합니다. 혼자 삼키는 고민을 가끔은 물 밖으로 꺼내놓으세요.",
};

static GYE: DayMasterReading = DayMasterReading {
    feature: "대지를 적시는 봄비",
    summary: "계수 일간의 당신은 소리 없이 스며들어 만물을 틔우는 빗물 같은 사람입니다.",
    personality:
        "감수성이 풍부하고 직관이 비상합니다. 조용히 관찰하다 핵심을 꿰뚫는 통찰을 내놓아 주변을 놀라게 하는 타입입니다.",
    love: "스며드는 연애를 합니다. 요란한 고백보다 어느새 일상이 되어 있는 사랑을 하니, 당신의 속도를 기다려주는 사람이 인연입니다.",
    work: "작가, 분석가, 참모처럼 통찰을 파는 일이 맞습니다. 전면에 나서기보다 뒤에서 판세를 읽을 때 진가가 드러납니다.",
    wealth: "가랑비에 옷 젖듯 모이는 재물운입니다. 작은 수입원을 여러 갈래 두면 어느새 강을 이룹니다.",
    advice: "비는 고이면 흐려집니다. 생각이 많아질 때는 몸을 움직여 물길을 틔우세요.",
};

/// The deterministic engine: pure table lookup plus field selection.
pub struct RuleEngine;

#[async_trait]
impl AnalysisEngine for RuleEngine {
    async fn analyze(&self, ctx: &AnalysisContext) -> Result<AnalysisResult, AppError> {
        Ok(compose(ctx.pillars.day_master(), ctx.test.kind))
    }
}

/// Builds the four-field answer: `summary`, `personality`, `advice` are
/// copied verbatim; the selector-matched field rides in `future_partner`.
pub fn compose(day_master: Stem, kind: TestKind) -> AnalysisResult {
    let reading = day_master_reading(day_master);
    let future_partner = match kind {
        TestKind::Love => reading.love,
        TestKind::Work => reading.work,
        TestKind::Wealth => reading.wealth,
    };
    AnalysisResult {
        summary: reading.summary.to_string(),
        personality: reading.personality.to_string(),
        future_partner: future_partner.to_string(),
        advice: reading.advice.to_string(),
    }
}
