//! Built-in content of the report: the page banner and the four lab
//! exercise records, compiled in as literals.
//!
//! The listings are embedded verbatim; the `\n` sequences inside the C
//! string literals belong to the listings themselves, which is why the
//! records are written as raw strings.

use crate::model::LabRecord;

/// Banner text rendered at the top of every page.
pub const BANNER: &str = "Operating Systems Lab Codes & Outputs";

/// Returns the four lab records in report order.
pub fn builtin_records() -> Vec<LabRecord> {
    vec![
        LabRecord::new(
            "1. Fork and Wait",
            r#"#include<stdio.h>
#include<unistd.h>
#include<sys/types.h>
#include<sys/wait.h>
int main(){
    pid_t pid;
    pid=fork();
    if(pid<0){
        perror("fork failed");
        return 1;
    }
    else if(pid==0){
        printf("PCCSL407 ");
    }
    else{
        wait(NULL);
        printf("Operating Systems Lab\n");
    }
    return 0;
}"#,
            "user@localhost:~$ ./program1\nPCCSL407 Operating Systems Lab",
        ),
        LabRecord::new(
            "2. Fork, PID, and Sleep",
            r#"#include<stdio.h>
#include<unistd.h>
#include<sys/types.h>
int main(){
    pid_t pid;
    pid=fork();
    if(pid<0){
        perror("Fork failed");
        return 1;
    }
    else if(pid==0) {
        printf("Child Process: \n");
        printf("Child PID: %d\n", getpid());
        printf("Parent PID: %d\n", getppid());
    }
    else{
        printf("Parent Process: \n");
        printf("Parent PID: %d\n", getpid());
        printf("Child PID: %d\n", pid);
        sleep(5);
        return 0;
    }
}"#,
            "user@localhost:~$ ./program2\nParent Process:\nParent PID: 3045\nChild PID: 3046\nChild Process:\nChild PID: 3046\nParent PID: 3045",
        ),
        LabRecord::new(
            "3. Argument Adder (myadder.c)",
            r#"#include <stdio.h>
#include <stdlib.h>
int main(int argc, char *argv[])
{
    if(argc!=3){
        printf("Usage: %s <num1> <num2>\n",argv[0]);
        return 1;
    }
    int a= atoi(argv[1]);
    int b= atoi(argv[2]);
    int sum=a+b;
    printf("Sum of %d and %d is %d\n",a,b, sum);
    return 0;
}"#,
            "user@localhost:~$ gcc myadder.c -o myadder\nuser@localhost:~$ ./myadder 10 20\nSum of 10 and 20 is 30",
        ),
        LabRecord::new(
            "4. Execvp Implementation",
            r#"#include<stdio.h>
#include<stdlib.h>
#include<unistd.h>
#include<sys/types.h>
#include<sys/wait.h>
int main(){
    pid_t pid;
    pid=fork();
    if(pid<0){
        perror("Fork failed");
        exit(1);
    }
    else if(pid==0) {
        printf("Child process (PID:%d) executing myadder...\n", getpid());
        char *args[]={"./myadder", "10", "20", NULL};
        execvp(args[0], args);
        perror("execvp failed");
        exit(1);
    }
    else{
        printf("Parent process (PID: %d) created child (PID:%d)\n", getpid(),pid);
        wait(NULL);
        printf("Child completed execution.\n");
    }
    return 0;
}"#,
            "user@localhost:~$ ./exec_demo\nParent process (PID: 4100) created child (PID:4101)\nChild process (PID:4101) executing myadder...\nSum of 10 and 20 is 30\nChild completed execution.",
        ),
    ]
}
