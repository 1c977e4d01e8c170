//! 关键词规则表：按固定顺序检查，命中即返回。

/// The scenario a piece of text was classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    PigButchering,
    FakeCustomerService,
    TaskScam,
    Generic,
}

impl Scenario {
    /// Evaluation order of the keyword rules. The first rule that matches wins,
    /// so a text carrying keywords from several rules resolves to the earliest one.
    pub const RULE_ORDER: [Scenario; 3] = [
        Scenario::PigButchering,
        Scenario::FakeCustomerService,
        Scenario::TaskScam,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Scenario::PigButchering => "pig_butchering",
            Scenario::FakeCustomerService => "fake_customer_service",
            Scenario::TaskScam => "task_scam",
            Scenario::Generic => "generic",
        }
    }

    /// Trigger keywords, stored lower-case. `Generic` is the fallback and has none.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Scenario::PigButchering => &["杀猪盘", "投资", "比特币", "usdt"],
            Scenario::FakeCustomerService => &["客服", "征信", "京东", "注销"],
            Scenario::TaskScam => &["刷单", "兼职", "点赞", "任务"],
            Scenario::Generic => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch {
    pub scenario: Scenario,
    pub keyword: Option<&'static str>,
}

pub fn match_scenario(text: &str) -> RuleMatch {
    let lowered = text.to_lowercase();
    for scenario in Scenario::RULE_ORDER {
        let hit = scenario
            .keywords()
            .iter()
            .copied()
            .find(|keyword| lowered.contains(*keyword));
        if let Some(keyword) = hit {
            return RuleMatch {
                scenario,
                keyword: Some(keyword),
            };
        }
    }
    RuleMatch {
        scenario: Scenario::Generic,
        keyword: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_stored_lower_case() {
        for scenario in Scenario::RULE_ORDER {
            for keyword in scenario.keywords() {
                assert_eq!(*keyword, keyword.to_lowercase());
            }
        }
    }

    #[test]
    fn each_keyword_selects_its_rule() {
        for scenario in Scenario::RULE_ORDER {
            for keyword in scenario.keywords() {
                let text = format!("对方说了{keyword}这件事");
                let matched = match_scenario(&text);
                assert_eq!(matched.scenario, scenario, "keyword {keyword}");
                assert_eq!(matched.keyword, Some(*keyword));
            }
        }
    }

    #[test]
    fn matching_ignores_ascii_case() {
        assert_eq!(
            match_scenario("转 500 USDT 到这个地址").scenario,
            Scenario::PigButchering
        );
        assert_eq!(match_scenario("Usdt").keyword, Some("usdt"));
    }

    #[test]
    fn earlier_rule_wins() {
        assert_eq!(
            match_scenario("京东客服让我买usdt").scenario,
            Scenario::PigButchering
        );
        assert_eq!(
            match_scenario("兼职任务要先注销账户").scenario,
            Scenario::FakeCustomerService
        );
    }

    #[test]
    fn unmatched_text_falls_back_to_generic() {
        let matched = match_scenario("你好");
        assert_eq!(matched.scenario, Scenario::Generic);
        assert_eq!(matched.keyword, None);
        assert_eq!(match_scenario("").scenario, Scenario::Generic);
    }
}
