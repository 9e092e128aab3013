//! Static board layout. Neighbour order is significant: movement options and
//! tie-breaks enumerate routes in the order listed here.

use super::Node;
use super::Node::*;

pub(super) fn land(node: Node) -> &'static [(Node, u32)] {
    match node {
        AddisAbeba => &[(CapeGuardafui, 3), (LakeVictoria, 3), (Suakin, 3)],
        AinGalaka => &[(DarFur, 4), (Crossroads2, 4)],
        BahrElGhasal => &[(DarFur, 2), (LakeVictoria, 2)],
        Congo => &[(Kandjama, 3), (Ocomba, 4), (Crossroads4, 8)],
        Daressalam => &[(CapeGuardafui, 6), (Crossroads3, 1)],
        DarFur => &[
            (AinGalaka, 4),
            (BahrElGhasal, 2),
            (Egypt, 3),
            (Sahara, 8),
            (Suakin, 4),
            (Crossroads2, 4),
        ],
        DragonMountain => &[(VictoriaFalls, 3), (Crossroads5, 2)],
        Egypt => &[(DarFur, 3), (Tripoli, 6), (Cairo, 4)],
        GoldCoast => &[(Crossroads1, 2)],
        CapeGuardafui => &[(AddisAbeba, 3), (Daressalam, 6)],
        Kandjama => &[(Congo, 3), (Crossroads2, 2)],
        LakeVictoria => &[(AddisAbeba, 3), (BahrElGhasal, 2), (Ocomba, 4), (Crossroads3, 4)],
        Morocco => &[(CapeVerde, 8), (Crossroads0, 1)],
        Mozambique => &[(Crossroads3, 2), (Crossroads4, 2)],
        Ocomba => &[(Congo, 4), (LakeVictoria, 4)],
        Sahara => &[(DarFur, 8), (Crossroads0, 4)],
        SierraLeone => &[(CapeVerde, 4), (Crossroads1, 3)],
        SlaveCoast => &[(Timbuktu, 5), (Crossroads2, 3)],
        CapeStMarie => &[(Tamatave, 4)],
        Suakin => &[(AddisAbeba, 3), (DarFur, 4)],
        Tamatave => &[(CapeStMarie, 4)],
        Timbuktu => &[(SlaveCoast, 5), (Crossroads1, 2)],
        Capetown => &[(WhalefishBay, 4)],
        Tripoli => &[(Egypt, 6), (Tunis, 3)],
        Tunis => &[(Tripoli, 3), (Tangier, 5)],
        CapeVerde => &[(Morocco, 8), (SierraLeone, 4)],
        VictoriaFalls => &[(DragonMountain, 3), (WhalefishBay, 4), (Crossroads5, 2)],
        WhalefishBay => &[(Capetown, 4), (VictoriaFalls, 4)],
        Cairo => &[(Egypt, 4)],
        Tangier => &[(Tunis, 5), (Crossroads0, 1)],
        Crossroads0 => &[(Morocco, 1), (Sahara, 4), (Tangier, 1)],
        Crossroads1 => &[(GoldCoast, 2), (SierraLeone, 3), (Timbuktu, 2)],
        Crossroads2 => &[(AinGalaka, 4), (DarFur, 4), (Kandjama, 2), (SlaveCoast, 3)],
        Crossroads3 => &[(Daressalam, 1), (LakeVictoria, 4), (Mozambique, 2)],
        Crossroads4 => &[(Congo, 8), (Mozambique, 2), (Crossroads5, 1)],
        Crossroads5 => &[(DragonMountain, 2), (VictoriaFalls, 2), (Crossroads4, 1)],
        _ => &[],
    }
}

pub(super) fn sea(node: Node) -> &'static [(Node, u32)] {
    match node {
        CanaryIslands => &[(CapeVerde, 5), (Tangier, 3)],
        Congo => &[(WhalefishBay, 5), (Crossroads8, 4)],
        GoldCoast => &[(SierraLeone, 5), (Crossroads8, 3)],
        CapeGuardafui => &[(Mozambique, 8), (Suakin, 5), (Tamatave, 8)],
        Mozambique => &[(CapeGuardafui, 8), (CapeStMarie, 3)],
        SierraLeone => &[(GoldCoast, 5), (Crossroads7, 2)],
        SlaveCoast => &[(Crossroads8, 1)],
        StHelena => &[(Crossroads7, 9), (Crossroads9, 8)],
        CapeStMarie => &[(Mozambique, 3), (Capetown, 8)],
        Suakin => &[(CapeGuardafui, 5), (Cairo, 4)],
        Tamatave => &[(CapeGuardafui, 8)],
        Capetown => &[(CapeStMarie, 8), (Crossroads9, 2)],
        Tripoli => &[(Crossroads6, 1)],
        Tunis => &[(Tangier, 3), (Crossroads6, 2)],
        CapeVerde => &[(CanaryIslands, 5), (Crossroads7, 1)],
        WhalefishBay => &[(Congo, 5), (Crossroads9, 3)],
        Cairo => &[(Suakin, 4), (Crossroads6, 3)],
        Tangier => &[(CanaryIslands, 3), (Tunis, 3)],
        Crossroads6 => &[(Tripoli, 1), (Tunis, 2), (Cairo, 3)],
        Crossroads7 => &[(SierraLeone, 2), (StHelena, 9), (CapeVerde, 1)],
        Crossroads8 => &[(Congo, 4), (GoldCoast, 3), (SlaveCoast, 1)],
        Crossroads9 => &[(StHelena, 8), (Capetown, 2), (WhalefishBay, 3)],
        _ => &[],
    }
}

pub(super) fn air(node: Node) -> &'static [Node] {
    match node {
        Congo => &[GoldCoast, WhalefishBay],
        DarFur => &[Ocomba, Suakin, Tripoli],
        DragonMountain => &[LakeVictoria, Capetown],
        GoldCoast => &[Congo, Morocco, Tripoli, WhalefishBay],
        CapeGuardafui => &[LakeVictoria, Tamatave],
        LakeVictoria => &[DragonMountain, CapeGuardafui, Suakin],
        Morocco => &[GoldCoast, SierraLeone, Tangier],
        Ocomba => &[DarFur, Capetown],
        SierraLeone => &[Morocco, StHelena],
        StHelena => &[SierraLeone, Capetown],
        CapeStMarie => &[Capetown],
        Suakin => &[DarFur, LakeVictoria, Cairo],
        Tamatave => &[CapeGuardafui, Capetown],
        Capetown => &[DragonMountain, Ocomba, StHelena, CapeStMarie, Tamatave, WhalefishBay],
        Tripoli => &[DarFur, GoldCoast, Tangier],
        WhalefishBay => &[Congo, GoldCoast, Capetown],
        Cairo => &[Suakin],
        Tangier => &[Morocco, Tripoli],
        _ => &[],
    }
}
