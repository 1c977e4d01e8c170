use protocol::control::PresetInfo;

/// Quick-try demo inputs offered next to the input box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Preset {
    PigButchering,
    FakeCustomerService,
    Brushing,
}

impl Preset {
    pub(crate) const ALL: [Preset; 3] = [
        Preset::PigButchering,
        Preset::FakeCustomerService,
        Preset::Brushing,
    ];

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.name() == name)
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Preset::PigButchering => "pig_butchering",
            Preset::FakeCustomerService => "fake_cs",
            Preset::Brushing => "brushing",
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Preset::PigButchering => "杀猪盘案例",
            Preset::FakeCustomerService => "假客服案例",
            Preset::Brushing => "刷单兼职案例",
        }
    }

    pub(crate) fn text(self) -> &'static str {
        match self {
            Preset::PigButchering => "测试杀猪盘案例",
            Preset::FakeCustomerService => "测试假客服案例",
            Preset::Brushing => "测试刷单兼职案例",
        }
    }

    pub(crate) fn info(self) -> PresetInfo {
        PresetInfo {
            name: self.name().to_string(),
            label: self.label().to_string(),
            text: self.text().to_string(),
        }
    }
}
