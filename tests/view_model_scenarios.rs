//! End-to-end scenarios for the paged view-model

use mvvm_playground::mvvm::{
    InputCommand, Model, OutputBatch, OutputCommand, PagedViewModel, Palette, SimulatedFetcher,
    ViewModel,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::LocalSet;
use tokio::time::timeout;

fn setup() -> (
    PagedViewModel<SimulatedFetcher, StdRng>,
    mpsc::UnboundedReceiver<OutputBatch>,
) {
    let vm = PagedViewModel::new(
        SimulatedFetcher::new(Duration::from_millis(10)),
        StdRng::seed_from_u64(2024),
    );
    let (tx, rx) = mpsc::unbounded_channel();
    vm.set_output(Some(Rc::new(move |batch: OutputBatch| {
        let _ = tx.send(batch);
    })));
    (vm, rx)
}

async fn recv(rx: &mut mpsc::UnboundedReceiver<OutputBatch>) -> OutputBatch {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("no output within 2s")
        .expect("output closed")
}

#[tokio::test]
async fn refresh_then_load_more_scenario() {
    LocalSet::new()
        .run_until(async {
            let (vm, mut rx) = setup();

            vm.input(InputCommand::Request(true));
            assert_eq!(recv(&mut rx).await, vec![OutputCommand::Loading("正在刷新".into())]);
            assert_eq!(
                recv(&mut rx).await,
                vec![
                    OutputCommand::Loaded("已完成".into()),
                    OutputCommand::Reload(Model::new("数据 页数:1")),
                ]
            );

            vm.input(InputCommand::Request(false));
            assert_eq!(
                recv(&mut rx).await,
                vec![OutputCommand::Loading("努力加载中...".into())]
            );
            assert_eq!(
                recv(&mut rx).await,
                vec![
                    OutputCommand::Loaded("已完成".into()),
                    OutputCommand::Reload(Model::new("数据 页数:2")),
                ]
            );
            assert_eq!(vm.page(), 2);
        })
        .await;
}

#[tokio::test]
async fn every_request_yields_two_batches_with_page_in_title() {
    LocalSet::new()
        .run_until(async {
            let (vm, mut rx) = setup();
            let requests = [false, false, true, false, false, false, true];
            let mut expected_page = 1;

            for refresh in requests {
                expected_page = if refresh { 1 } else { expected_page + 1 };
                vm.input(InputCommand::Request(refresh));

                let loading = recv(&mut rx).await;
                assert_eq!(loading.len(), 1);
                assert!(matches!(loading[0], OutputCommand::Loading(_)));

                let done = recv(&mut rx).await;
                assert_eq!(done.len(), 2);
                assert!(matches!(done[0], OutputCommand::Loaded(_)));
                match &done[1] {
                    OutputCommand::Reload(model) => {
                        assert!(model.title.contains(&expected_page.to_string()))
                    }
                    other => panic!("expected reload, got {:?}", other),
                }
                assert_eq!(vm.page(), expected_page);
            }
        })
        .await;
}

#[tokio::test]
async fn color_changes_stay_in_palette() {
    LocalSet::new()
        .run_until(async {
            let (vm, mut rx) = setup();

            for _ in 0..50 {
                vm.input(InputCommand::RequestColorChange);
                let batch = recv(&mut rx).await;
                assert_eq!(batch.len(), 1);
                match batch[0] {
                    OutputCommand::ColorChanged(color) => assert!(Palette::contains(color)),
                    ref other => panic!("expected color change, got {:?}", other),
                }
            }
            assert_eq!(vm.page(), 1);
        })
        .await;
}
