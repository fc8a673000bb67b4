//! Frame Solver Example - Portal Frame under gravity and wind

use anyhow::Context;
use frame_solver::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Frame Solver Example: Portal Frame ===\n");

    //     N2 -------- N3
    //     |          |
    //     |          |
    //     N0        N1
    //   Fixed     Fixed
    let height = 4.0; // column height (m)
    let span = 6.0; // beam span (m)

    let mut frame = Structure::new();
    let n0 = frame.add_node(Node::new(0.0, 0.0));
    let n1 = frame.add_node(Node::new(span, 0.0));
    let n2 = frame.add_node(Node::new(0.0, height));
    let n3 = frame.add_node(Node::new(span, height));

    let steel = Material::steel();
    let column = Section::rectangular(0.3, 0.3);
    let girder = Section::rectangular(0.3, 0.5);

    let col_left = frame.add_member(n0, n2, &steel, &column)?;
    let col_right = frame.add_member(n1, n3, &steel, &column)?;
    let beam = frame.add_member(n2, n3, &steel, &girder)?;

    frame.add_support(Support::fixed(n0))?;
    frame.add_support(Support::fixed(n1))?;

    // Dead: 20 kN/m downward on the beam
    let dead = LoadCase::new(
        "Dead",
        LoadSet::new().with_distributed(DistributedLoad::global(beam, -20_000.0, -20_000.0)),
    );
    // Wind: 10 kN at roof level plus a triangular pressure on the windward column
    let wind = LoadCase::new(
        "Wind",
        LoadSet::new()
            .with_nodal(NodalLoad::force(n2, 10_000.0, 0.0))
            .with_distributed(DistributedLoad::new(col_left, 0.0, 2_000.0, LoadDirection::GlobalX)),
    )
    .with_description("Lateral wind from the left");
    let cases = [dead, wind];

    let combos = [
        LoadCombination::new("1.4D").with_case("Dead", 1.4),
        LoadCombination::new("1.2D + 1.0W")
            .with_case("Dead", 1.2)
            .with_case("Wind", 1.0),
    ];

    let options = AnalysisOptions::linear().with_statics_check();

    for combo in &combos {
        let loads = combo.combine(&cases)?;
        let solution = frame
            .solve_with(&loads, &options)
            .with_context(|| format!("analysis of {} failed", combo.name))?;

        println!("=== Results for {} ===\n", combo.name);

        println!("Node Displacements:");
        for node in [n0, n1, n2, n3] {
            let disp = solution.node_displacement(node)?;
            println!(
                "  N{}: DX={:.4}mm, DY={:.4}mm, RZ={:.6}rad",
                node,
                disp.dx * 1000.0,
                disp.dy * 1000.0,
                disp.rz
            );
        }

        println!("\nSupport Reactions:");
        for node in [n0, n1] {
            let rxn = solution.support_reactions(node)?;
            println!(
                "  N{}: FX={:.2}kN, FY={:.2}kN, M={:.2}kN·m",
                node,
                rxn.fx / 1000.0,
                rxn.fy / 1000.0,
                rxn.m / 1000.0
            );
        }

        println!("\nMember Forces:");
        for (name, element) in [("Col1", col_left), ("Col2", col_right), ("Beam", beam)] {
            let start = solution.member_forces_0(element)?;
            let diagram = &solution.member(element)?.diagram;
            let (v_max, _) = diagram.max_abs_shear();
            let (m_max, at) = diagram.max_abs_moment();
            println!(
                "  {}: N={:.2}kN, Vmax={:.2}kN, Mmax={:.2}kN·m at {:.2}m",
                name,
                start.axial / 1000.0,
                v_max / 1000.0,
                m_max / 1000.0,
                at
            );
        }

        let summary = solution.summary();
        println!("\nSummary:");
        println!(
            "  Max displacement: {:.4}mm at N{}",
            summary.max_displacement * 1000.0,
            summary.max_disp_node
        );
        println!(
            "  Max reaction: {:.2}kN at N{}",
            summary.max_reaction / 1000.0,
            summary.max_reaction_node
        );
        println!(
            "  Max axial: {:.2}kN in element {}",
            summary.max_axial / 1000.0,
            summary.max_axial_element
        );
        println!(
            "  Max moment: {:.2}kN·m in element {}",
            summary.max_moment / 1000.0,
            summary.max_moment_element
        );
        println!();
    }

    println!("=== Analysis Complete ===");
    Ok(())
}
