use crate::aa::{AAFramework, Argument};
use crate::utils::LabelType;

/// Computes the grounded extension of an AF.
///
/// Unattacked arguments are accepted first; each accepted argument defeats the arguments it attacks,
/// and an argument whose attackers are all defeated becomes accepted in turn.
pub(crate) fn grounded_extension<T>(af: &AAFramework<T>) -> Vec<&Argument<T>>
where
    T: LabelType,
{
    let mut ext = vec![];
    let mut n_processed_args = 0;
    let mut defeated_args = vec![false; af.n_arguments()];
    let mut undefeated_attackers = (0..af.n_arguments())
        .map(|i| {
            let n = af.attacker_ids(i).len();
            if n == 0 {
                ext.push(af.argument_set().get_label_by_id(i))
            }
            n
        })
        .collect::<Vec<usize>>();
    while n_processed_args < ext.len() {
        let id = ext[n_processed_args].id();
        for defeated in af.attacked_ids(id) {
            if defeated_args[*defeated] {
                continue;
            }
            defeated_args[*defeated] = true;
            for attacked in af.attacked_ids(*defeated) {
                undefeated_attackers[*attacked] -= 1;
                if undefeated_attackers[*attacked] == 0 {
                    ext.push(af.argument_set().get_label_by_id(*attacked))
                }
            }
        }
        n_processed_args += 1;
    }
    ext
}
