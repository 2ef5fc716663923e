use serde::Serialize;

/// A ConectaFast internet plan as shown to customers.
#[derive(Clone, Debug, Serialize)]
pub struct PlanInfo {
    #[serde(skip_serializing)]
    pub id: &'static str,
    pub name: &'static str,
    pub speed: &'static str,
    pub price: &'static str,
    pub features: &'static [&'static str],
    pub ideal: &'static str,
}

pub static BASIC: PlanInfo = PlanInfo {
    id: "basic",
    name: "Plano Básico",
    speed: "100 Mbps",
    price: "R$ 79,90/mês",
    features: &["Wi-Fi grátis", "Instalação gratuita", "Suporte 24h"],
    ideal: "navegação básica, redes sociais, e-mail",
};

pub static STANDARD: PlanInfo = PlanInfo {
    id: "standard",
    name: "Plano Padrão",
    speed: "300 Mbps",
    price: "R$ 99,90/mês",
    features: &[
        "Wi-Fi grátis",
        "Instalação gratuita",
        "Suporte 24h",
        "Netflix incluso",
    ],
    ideal: "streaming, home office, jogos online",
};

pub static PREMIUM: PlanInfo = PlanInfo {
    id: "premium",
    name: "Plano Premium",
    speed: "600 Mbps",
    price: "R$ 149,90/mês",
    features: &[
        "Wi-Fi grátis",
        "Instalação gratuita",
        "Suporte 24h",
        "Netflix + Prime Video",
        "Técnico prioritário",
    ],
    ideal: "múltiplos usuários, streaming 4K, trabalho pesado",
};

pub static ULTRA: PlanInfo = PlanInfo {
    id: "ultra",
    name: "Plano Ultra",
    speed: "1 Giga",
    price: "R$ 199,90/mês",
    features: &[
        "Wi-Fi 6 grátis",
        "Instalação gratuita",
        "Suporte 24h",
        "Todos streamings inclusos",
        "Técnico prioritário",
        "IP fixo",
    ],
    ideal: "empresas, gamers profissionais, streaming em alta qualidade",
};

static ALL_PLANS: &[&PlanInfo] = &[&BASIC, &STANDARD, &PREMIUM, &ULTRA];

pub fn all_plans() -> &'static [&'static PlanInfo] {
    ALL_PLANS
}

pub fn find_plan(id: &str) -> Option<&'static PlanInfo> {
    ALL_PLANS.iter().find(|p| p.id == id).copied()
}
