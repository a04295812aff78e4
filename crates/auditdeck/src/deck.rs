use std::num::NonZeroUsize;

/// The content units a deck can hold, one per report topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideKind {
    Cover,
    Indicators,
    RevenueLeaks,
    WeeklyFlow,
    AuditVsBilling,
    ErrorDistribution,
    ItemRanking,
    Insurers,
    Professionals,
    ErrorCategories,
    Strategy,
    NextSteps,
    Closing,
}

impl SlideKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Cover => "Relatório Executivo",
            Self::Indicators => "Visão Geral dos Indicadores",
            Self::RevenueLeaks => "Principais Ralos de Receita",
            Self::WeeklyFlow => "Fluxo de Contas por Dia",
            Self::AuditVsBilling => "Equilíbrio: Entrada vs Saída",
            Self::ErrorDistribution => "Origem dos Erros",
            Self::ItemRanking => "Ranking de Ocorrências",
            Self::Insurers => "Erros por Convênio",
            Self::Professionals => "Produtividade & Ocorrências",
            Self::ErrorCategories => "Categorias Críticas",
            Self::Strategy => "Papel Estratégico",
            Self::NextSteps => "Próximos Passos",
            Self::Closing => "Encerramento",
        }
    }

    /// Whether the unit draws a chart and so cares about the print palette
    /// and entry animation.
    pub fn has_chart(self) -> bool {
        matches!(
            self,
            Self::WeeklyFlow | Self::AuditVsBilling | Self::ErrorDistribution | Self::ErrorCategories
        )
    }
}

/// Fixed, ordered collection of slides. Built once at startup.
#[derive(Debug, Clone)]
pub struct Deck {
    slides: Vec<SlideKind>,
}

impl Deck {
    /// The executive audit report in presentation order.
    pub fn audit_report() -> Self {
        Self {
            slides: vec![
                SlideKind::Cover,
                SlideKind::Indicators,
                SlideKind::RevenueLeaks,
                SlideKind::WeeklyFlow,
                SlideKind::AuditVsBilling,
                SlideKind::ErrorDistribution,
                SlideKind::ItemRanking,
                SlideKind::Insurers,
                SlideKind::Professionals,
                SlideKind::ErrorCategories,
                SlideKind::Strategy,
                SlideKind::NextSteps,
                SlideKind::Closing,
            ],
        }
    }

    pub fn len(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.slides.len()).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn get(&self, index: usize) -> Option<SlideKind> {
        self.slides.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, SlideKind)> + '_ {
        self.slides.iter().copied().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_report_order() {
        let deck = Deck::audit_report();
        assert_eq!(deck.len().get(), 13);
        assert_eq!(deck.get(0), Some(SlideKind::Cover));
        assert_eq!(deck.get(7), Some(SlideKind::Insurers));
        assert_eq!(deck.get(12), Some(SlideKind::Closing));
        assert_eq!(deck.get(13), None);
    }

    #[test]
    fn test_chart_slides() {
        let charts: Vec<SlideKind> = Deck::audit_report()
            .iter()
            .map(|(_, kind)| kind)
            .filter(|kind| kind.has_chart())
            .collect();
        assert_eq!(
            charts,
            vec![
                SlideKind::WeeklyFlow,
                SlideKind::AuditVsBilling,
                SlideKind::ErrorDistribution,
                SlideKind::ErrorCategories,
            ]
        );
    }
}
