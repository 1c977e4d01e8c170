//! Canned analysis payloads, one per [`Scenario`].
//!
//! Every payload is literal data. Nothing here depends on the input text
//! beyond which scenario fired, so the same scenario always yields an
//! identical [`AnalysisResult`].

use protocol::{AnalysisResult, RiskLevel, VerificationStrategy};

use crate::rules::Scenario;

/// Builds a fresh copy of the payload for `scenario`.
pub fn payload(scenario: Scenario) -> AnalysisResult {
    match scenario {
        Scenario::PigButchering => pig_butchering(),
        Scenario::FakeCustomerService => fake_customer_service(),
        Scenario::TaskScam => task_scam(),
        Scenario::Generic => generic(),
    }
}

fn block(lines: &[&str]) -> String {
    lines.join("\n")
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn strategy(
    kind: &str,
    explanation: &str,
    reply: &str,
    expected_reaction: &str,
) -> VerificationStrategy {
    VerificationStrategy {
        kind: kind.to_string(),
        explanation: explanation.to_string(),
        reply: reply.to_string(),
        expected_reaction: expected_reaction.to_string(),
    }
}

fn pig_butchering() -> AnalysisResult {
    AnalysisResult {
        risk_score: 98,
        risk_level: RiskLevel::Critical,
        summary: "【模拟结果：杀猪盘】系统检测到极高风险的‘杀猪盘’（Pig Butchering Scam）特征。骗子通过长期的情感培养建立信任，随后引入投资话题。这种模式通常会导致受害者遭受巨额财产损失。".to_string(),
        generated_conversation: Some(block(&[
            "[20:15] 骗子: 亲爱的，还在加班吗？心疼你，记得吃饭。🌹",
            "[20:30] 受害者: 刚忙完，准备回去了。",
            "[20:35] 骗子: 辛苦啦！为了我们的未来，现在努力一点也是值得的。对了，今天比特币那个节点收益不错，我刚才提了500U出来，打算给你买个礼物。🎁",
            "[20:40] 受害者: 你怎么老是在弄这个呀，我不懂这些。",
            "[20:42] 骗子: 傻瓜，为了让我们以后生活更自由呀。其实很简单的，我舅舅在华尔街做了20年，有内幕消息。要不带你体验一下？就投几百块，赚了算你的，亏了算我的。",
            "[20:45] 受害者: 真的稳赚不赔吗？",
            "[20:46] 骗子: 放心吧，有我在呢。你下载这个‘SecureWallet’（虚假APP），我教你操作，几分钟就能看到收益。",
        ])),
        scammer_motive: "利用虚假的‘高额回报’和‘情感关系’作为诱饵，核心目的是诱导受害者将资金转入其控制的诈骗平台。".to_string(),
        expected_outcome: "受害者在初期小额获利并成功提现后，会放松警惕，投入大额资金。随后平台会以‘税务问题’、‘违规操作’为由冻结账户，要求缴纳更多费用，最终骗子失联。".to_string(),
        red_flags: lines(&[
            "无缘无故的过度关心和‘未来许诺’",
            "提及‘内幕消息’、‘稳赚不赔’",
            "诱导下载非官方应用商店的APP",
            "试图将话题引导至金钱投资",
            "承诺‘亏了算我的’来降低受害者心理防线",
        ]),
        psychological_tactics: lines(&[
            "杀猪盘 (Pig Butchering)",
            "情感轰炸 (Love Bombing)",
            "沉没成本谬误 (Sunk Cost Fallacy)",
            "制造稀缺感与紧迫感",
        ]),
        verification_strategies: vec![
            strategy(
                "技术装傻 (Feigned Incompetence)",
                "假装不会操作，看对方反应。",
                "亲爱的，我手机提示这个APP有病毒，禁止安装，怎么办呀？我是不是太笨了？😰",
                "骗子会非常急切，甚至发视频教程教你关闭手机安全防护，或者让你换个手机试试。",
            ),
            strategy(
                "视频验证 (Video Call)",
                "验证对方身份真实性。",
                "打字好累，我们视频聊一会吧？想看看你。",
                "找理由拒绝（如：在开密会、摄像头坏了、网络不好），或者视频画面与本人不符（AI换脸痕迹）。",
            ),
            strategy(
                "资金隔离 (Money Rejection)",
                "直接拒绝金钱话题。",
                "我答应过家里人，绝对不碰任何投资理财的东西。我们只谈感情好吗？",
                "如果是骗子，态度会立刻冷淡，甚至直接消失，因为你没有‘利用价值’了。",
            ),
        ],
        actionable_advice: "这是一个典型的杀猪盘骗局。请立即停止任何转账行为，不要点击对方发送的链接。保存所有聊天记录作为证据，并向反诈中心举报。".to_string(),
        scam_alert_message: Some(block(&[
            "🚨 极度危险预警 (SCAM ALERT)",
            "",
            "致当事人：",
            "这是一个典型的【杀猪盘】网络诈骗陷阱！",
            "",
            "🤖 AI 智能诊断结果：",
            "对方正在对你使用情感诱导心理战术，目的是掏空你的钱包。",
            "",
            "请立即执行：",
            "1. 🛑 停止转账（无论对方说得多紧急）。",
            "2. 🛑 不要点击链接（可能有木马）。",
            "3. 🛑 马上拉黑（不要试图感化骗子）。",
            "",
            "相信数据的判断，不要相信屏幕对面的陌生人。",
        ])),
    }
}

fn fake_customer_service() -> AnalysisResult {
    AnalysisResult {
        risk_score: 95,
        risk_level: RiskLevel::Critical,
        summary: "【模拟结果：冒充客服】系统识别为典型的‘冒充客服/征信诈骗’。骗子通常冒充京东、支付宝或银行客服，以‘注销校园贷’、‘修复征信’或‘误开通会员’为由，通过恐吓手段迫使受害者转账。".to_string(),
        generated_conversation: Some(block(&[
            "[10:00] 骗子: 您好，我是京东金融客服工号9527。系统检测到您的京东金条利率过高，不符合国家最新监管规定。",
            "[10:01] 受害者: 啊？那我该怎么办？",
            "[10:02] 骗子: 您需要配合我们进行‘资金清算’并注销账户，否则将严重影响您的个人征信（人民银行征信系统）。这会影响您以后买房买车贷款。",
            "[10:03] 受害者: 这么严重吗？但我没用过金条啊。",
            "[10:04] 骗子: 是因为您之前注册信息被误关联了。请您现在下载‘瞩目’或者是‘腾讯会议’APP，开启屏幕共享，我指导您操作后台消除记录。",
            "[10:05] 受害者: 好的，我下载好了。",
            "[10:06] 骗子: 好的，现在请您打开银行APP，为了验证资金流向，您需要将余额转入我们的‘银监会认证对接账户’，验证完成后资金会自动原路退回。",
        ])),
        scammer_motive: "利用受害者对‘个人征信’的恐惧心理，诱导开启‘屏幕共享’以此窃取验证码，或直接诱导转账到所谓的‘安全账户’。".to_string(),
        expected_outcome: "受害者在恐慌中将所有积蓄转给骗子，甚至去其他贷款平台借款转账。骗子得手后立即拉黑。".to_string(),
        red_flags: lines(&[
            "冒充大平台官方客服（且多用私人手机号来电）",
            "提及‘影响征信’、‘坐牢’等恐吓性词汇",
            "要求下载‘视频会议软件’开启屏幕共享",
            "要求转账到‘安全账户’或‘认证账户’",
        ]),
        psychological_tactics: lines(&[
            "权威暗示 (Authority Bias)",
            "恐惧诉求 (Fear Appeal)",
            "时间紧迫感 (Urgency)",
        ]),
        verification_strategies: vec![
            strategy(
                "官方核实 (Official Verification)",
                "不轻信来电，反向拨打官方电话。",
                "麻烦你提供一下工号，我现在挂断电话，直接打京东官方客服热线核实一下。",
                "骗子会极力阻止你挂电话，说‘官方热线繁忙’、‘这是内部专线’或威胁‘挂断就无法处理征信’。",
            ),
            strategy(
                "屏幕共享陷阱测试 (Screen Share Trap)",
                "拒绝高风险操作。",
                "我老公是警察，他说凡是让开屏幕共享的都是诈骗。要不我让他来跟你说？",
                "骗子听到警察会非常心虚，通常会直接挂断电话或破口大骂。",
            ),
            strategy(
                "拖延战术 (Stalling)",
                "打破对方的紧迫节奏。",
                "我现在正在开会，征信黑就黑吧，无所谓了，等我晚上下班再说。",
                "骗子会更加焦急，强调事情的严重性，试图把你拉回他的节奏中。",
            ),
        ],
        actionable_advice: "官方客服绝不会要求你‘屏幕共享’，也绝不会让你转账到私人账户。凡是提到‘注销校园贷’、‘影响征信’的电话，一律挂断。".to_string(),
        scam_alert_message: Some(block(&[
            "🛑 诈骗阻断警报 (SCAM ALERT)",
            "",
            "注意！正在与你通话的可能是【假冒客服】！",
            "",
            "诊断依据：",
            "1. 对方提到了“影响征信”或“注销账户”。",
            "2. 对方要求开启“屏幕共享”或“视频会议”。",
            "3. 对方要求转账到“指定账户”。",
            "",
            "请立即挂断电话！",
            "请立即挂断电话！",
            "请立即挂断电话！",
            "",
            "如有疑问，请自己去官方APP找客服，不要信电话里的人。",
        ])),
    }
}

fn task_scam() -> AnalysisResult {
    AnalysisResult {
        risk_score: 92,
        risk_level: RiskLevel::Critical,
        summary: "【模拟结果：刷单诈骗】系统识别为‘兼职刷单’或‘做任务’诈骗。骗子通常以‘动动手指月入过万’、‘给抖音点赞’为诱饵，前期给小额甜头，后期诱导大额充值。".to_string(),
        generated_conversation: Some(block(&[
            "[14:00] 骗子: 您好，我们在招募线上兼职，给短视频点赞，一单3-5元，日结，时间自由。",
            "[14:05] 受害者: 真的假的？不需要交押金吧？",
            "[14:06] 骗子: 绝对正规，不需要任何押金。您可以先试做一单，关注这个公众号，截图给我，立刻给您发3元红包。",
            "[14:10] (受害者尝试并收到了3元红包)",
            "[14:15] 骗子: 亲，您看很容易吧？现在我们有更高收益的任务，需要下载我们的接单APP。在APP里帮商家‘垫资采购’冲销量，佣金是本金的20%，做完本金佣金立返。",
            "[14:20] 受害者: 这个要自己先垫钱吗？",
            "[14:22] 骗子: 是的，这是为了模拟真实购物流程。您可以先试个300元的小单，5分钟后返您360元。这也是为了筛选诚意兼职人员。",
        ])),
        scammer_motive: "利用‘无需押金’和‘首单尝甜头’降低防备，目的是诱导受害者进行大额‘垫资’，最后以‘联单未完成’、‘操作失误’为由拒绝返款。".to_string(),
        expected_outcome: "受害者垫资几千甚至几万元后，发现无法提现，且被要求继续充值‘解冻资金’。".to_string(),
        red_flags: lines(&[
            "声称‘高薪低门槛’、‘动动手指赚钱’",
            "要求下载非正规应用商店的APP",
            "前期给予小额返利（糖衣炮弹）",
            "要求‘垫资’、‘充值’做任务",
            "出现‘联单’、‘数据错误’等术语",
        ]),
        psychological_tactics: lines(&[
            "登门槛效应 (Foot-in-the-door)",
            "利益诱惑",
            "沉没成本谬误",
        ]),
        verification_strategies: vec![
            strategy(
                "拒绝垫资 (No Advance Payment)",
                "坚守不掏钱的底线。",
                "我可以做点赞关注的任务，但是凡是需要我先垫钱的一律不做。我没钱。",
                "骗子会试图说服你‘舍不得孩子套不着狼’，或者说‘这是为了做数据’。如果坚持不垫资，对方会放弃你。",
            ),
            strategy(
                "反向索要 (Reverse Demand)",
                "打乱对方节奏。",
                "既然公司这么有实力，能不能先预付我50%的佣金？我怕你们跑路。",
                "骗子会以‘公司规定’、‘系统流程’为由拒绝，并指责你不信任他们。",
            ),
        ],
        actionable_advice: "所有要求‘垫资’、‘充值’的兼职都是诈骗。天上不会掉馅饼，正规兼职绝不会让你先交钱。".to_string(),
        scam_alert_message: Some(block(&[
            "🚫 刷单兼职警报 (SCAM ALERT)",
            "",
            "请立刻停止操作！",
            "",
            "AI 判定：这是【刷单诈骗】",
            "",
            "骗子套路：",
            "1. 先给你几块钱甜头（点赞/关注）。",
            "2. 诱导你下载APP进行“垫资任务”。",
            "3. 你充值后，永远无法提现。",
            "",
            "记住：凡是要求先垫钱的兼职，100%是诈骗！",
        ])),
    }
}

fn generic() -> AnalysisResult {
    AnalysisResult {
        risk_score: 85,
        risk_level: RiskLevel::Dangerous,
        summary: "系统分析显示，该内容具有较高的风险特征。对方身份信息模糊，且存在试图引导话题或建立某种操控关系的倾向。建议保持高度警惕。".to_string(),
        generated_conversation: None,
        scammer_motive: "初步判定为试图建立信任（建立人设），可能为后续的‘杀猪盘’、‘借款诈骗’或‘隐私窃取’做铺垫。".to_string(),
        expected_outcome: "在获取受害者信任后，可能会突然遭遇‘意外’需要借钱，或者推荐虚假投资理财产品。".to_string(),
        red_flags: lines(&[
            "身份背景过于完美或难以核实",
            "对话节奏由对方强力主导",
            "可能存在逻辑前后不一致的情况",
            "对个人隐私信息的探听",
        ]),
        psychological_tactics: lines(&[
            "光环效应 (Halo Effect)",
            "信息不对称利用",
            "快速推进关系 (Rushing Intimacy)",
        ]),
        verification_strategies: vec![
            strategy(
                "背景核实 (Background Check)",
                "通过询问具体细节来核实真实性。",
                "你之前说你在[某地]工作，那边最近是不是在修那条[虚构的路/地标]呀？我朋友说很堵。",
                "如果对方不在该地，可能会顺着你的话说，或者含糊其辞。",
            ),
            strategy(
                "拒绝服从 (Saying No)",
                "设立边界，看对方反应。",
                "我不喜欢把照片发给没见过面的人，我们可以先只语音聊天吗？",
                "骗子通常会表现出不满，试图用‘你不信任我’来让你感到内疚（煤气灯效应）。",
            ),
            strategy(
                "第三方验证 (Third Party proof)",
                "要求通过第三方平台验证。",
                "你的领英(LinkedIn)或者是公司官网链接能发我一下吗？我想多了解一下你的行业。",
                "以‘隐私’、‘公司保密’为由拒绝提供公开可查的信息。",
            ),
        ],
        actionable_advice: "不要轻易透露个人财务状况或家庭住址。建议尝试通过反向搜图检查对方头像是否为网图。在完全确认身份前，保持怀疑态度。".to_string(),
        scam_alert_message: Some(block(&[
            "⚠️ 安全警告：检测到可疑活动",
            "",
            "请注意，对方的行为模式符合潜在诈骗的前期特征。",
            "",
            "建议：",
            "1. 不要发送私密照片。",
            "2. 不要进行任何金钱往来。",
            "3. 如果感觉不对劲，请相信直觉，立即结束对话。",
        ])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_shapes_match_catalog() {
        let cases = [
            (Scenario::PigButchering, 98, RiskLevel::Critical, 5, 4, 3, true),
            (Scenario::FakeCustomerService, 95, RiskLevel::Critical, 4, 3, 3, true),
            (Scenario::TaskScam, 92, RiskLevel::Critical, 5, 3, 2, true),
            (Scenario::Generic, 85, RiskLevel::Dangerous, 4, 3, 3, false),
        ];
        for (scenario, score, level, flags, tactics, strategies, conversation) in cases {
            let result = payload(scenario);
            assert_eq!(result.risk_score, score, "{scenario:?}");
            assert_eq!(result.risk_level, level, "{scenario:?}");
            assert_eq!(result.red_flags.len(), flags, "{scenario:?}");
            assert_eq!(result.psychological_tactics.len(), tactics, "{scenario:?}");
            assert_eq!(result.verification_strategies.len(), strategies, "{scenario:?}");
            assert_eq!(result.generated_conversation.is_some(), conversation, "{scenario:?}");
            assert!(result.scam_alert_message.is_some(), "{scenario:?}");
        }
    }

    #[test]
    fn transcripts_keep_one_turn_per_line() {
        let conversation = payload(Scenario::PigButchering)
            .generated_conversation
            .expect("conversation");
        let turns: Vec<&str> = conversation.lines().collect();
        assert_eq!(turns.len(), 7);
        assert!(turns[0].starts_with("[20:15] 骗子:"));
        assert!(turns[6].starts_with("[20:46] 骗子:"));
    }

    #[test]
    fn alert_messages_keep_blank_lines() {
        let alert = payload(Scenario::Generic)
            .scam_alert_message
            .expect("alert");
        assert!(alert.starts_with("⚠️ 安全警告：检测到可疑活动\n\n"));
        assert!(alert.ends_with("立即结束对话。"));
    }
}
